use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::HostError;
use crate::scope::Scope;
use crate::signal::{Signal, SubscriberId, signal};

thread_local! {
    static CURRENT: RefCell<Option<RenderContext>> = const { RefCell::new(None) };
}

/// Slot table of one component instance.
#[derive(Default)]
pub struct Composer {
    pub slots: Vec<Box<dyn Any>>,
    pub cursor: usize,
    pub keyed_slots: HashMap<String, Box<dyn Any>>,
}

impl Composer {
    fn remember<T: 'static>(&mut self, init: impl FnOnce() -> T) -> Rc<T> {
        let cursor = self.cursor;
        self.cursor += 1;

        if cursor >= self.slots.len() {
            let rc: Rc<T> = Rc::new(init());
            self.slots.push(Box::new(rc.clone()));
            return rc;
        }

        if let Some(rc) = self.slots[cursor].downcast_ref::<Rc<T>>() {
            rc.clone()
        } else {
            log::warn!(
                "remember: slot {} type changed; replacing. \
                 If this is due to conditional composition, prefer remember_with_key.",
                cursor
            );
            let rc: Rc<T> = Rc::new(init());
            self.slots[cursor] = Box::new(rc.clone());
            rc
        }
    }

    fn remember_with_key<T: 'static>(&mut self, key: String, init: impl FnOnce() -> T) -> Rc<T> {
        if let Some(existing) = self.keyed_slots.get(&key) {
            if let Some(rc) = existing.downcast_ref::<Rc<T>>() {
                return rc.clone();
            }
            log::warn!(
                "remember_with_key: key '{}' reused with a different type; replacing.",
                key
            );
        }

        let rc: Rc<T> = Rc::new(init());
        self.keyed_slots.insert(key, Box::new(rc.clone()));
        rc
    }
}

/// What a hook can see of the instance currently rendering.
#[derive(Clone)]
struct RenderContext {
    composer: Rc<RefCell<Composer>>,
    invalidate: Invalidator,
}

/// Marks a host dirty. Held by state setters; cheap to clone.
#[derive(Clone)]
pub struct Invalidator {
    version: Signal<u64>,
    mounted: Rc<Cell<bool>>,
}

impl Invalidator {
    /// A detached invalidator; its host is never re-rendered.
    pub fn detached() -> Self {
        Self {
            version: signal(0),
            mounted: Rc::new(Cell::new(true)),
        }
    }

    pub fn invalidate(&self) {
        self.version.update(|v| *v += 1);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }
}

/// One mounted component instance.
///
/// `Host::render` runs a render function with this instance's slots
/// installed, so `remember` and the hooks built on it resolve to the same
/// storage on every render.
pub struct Host {
    composer: Rc<RefCell<Composer>>,
    scope: Scope,
    version: Signal<u64>,
    rendered_version: u64,
    render_count: usize,
    mounted: Rc<Cell<bool>>,
}

impl Host {
    pub fn new() -> Self {
        Self {
            composer: Rc::new(RefCell::new(Composer::default())),
            scope: Scope::new(),
            version: signal(0),
            rendered_version: 0,
            render_count: 0,
            mounted: Rc::new(Cell::new(true)),
        }
    }

    /// Render once.
    pub fn render<R>(&mut self, f: impl FnOnce() -> R) -> Result<R, HostError> {
        if !self.mounted.get() {
            return Err(HostError::Unmounted);
        }
        Ok(self.compose(f))
    }

    pub(crate) fn compose<R>(&mut self, f: impl FnOnce() -> R) -> R {
        // Clears the current context on unwind too.
        struct Reset(Option<RenderContext>);
        impl Drop for Reset {
            fn drop(&mut self) {
                let prev = self.0.take();
                CURRENT.with(|c| *c.borrow_mut() = prev);
            }
        }

        self.composer.borrow_mut().cursor = 0;
        let ctx = RenderContext {
            composer: self.composer.clone(),
            invalidate: Invalidator {
                version: self.version.clone(),
                mounted: self.mounted.clone(),
            },
        };
        let prev = CURRENT.with(|c| c.borrow_mut().replace(ctx));
        let _reset = Reset(prev);

        // Updates issued while rendering leave the host dirty again.
        let version = self.version.get();
        let out = self.scope.run(f);
        self.rendered_version = version;
        self.render_count += 1;
        log::trace!("host rendered (count={})", self.render_count);
        out
    }

    /// True when state changed since the last completed render.
    pub fn is_dirty(&self) -> bool {
        self.mounted.get() && self.version.get() != self.rendered_version
    }

    pub fn render_count(&self) -> usize {
        self.render_count
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.get()
    }

    /// Observe invalidations, e.g. to schedule a re-render from outside.
    ///
    /// `f` may itself update state of this host; invalidations raised while
    /// `f` runs are coalesced into one more call rather than nested ones.
    pub fn on_invalidate(&self, f: impl Fn() + 'static) -> SubscriberId {
        self.version.subscribe(move |_| f())
    }

    /// Dispose the instance scope and drop all slots.
    pub fn unmount(&mut self) {
        if !self.mounted.replace(false) {
            return;
        }
        self.scope.clone().dispose();
        let mut c = self.composer.borrow_mut();
        c.slots.clear();
        c.keyed_slots.clear();
        log::debug!("host unmounted after {} renders", self.render_count);
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Host {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn with_context<R>(f: impl FnOnce(Option<&RenderContext>) -> R) -> R {
    // Clone out so hook code never runs under the thread-local borrow.
    let ctx = CURRENT.with(|c| c.borrow().clone());
    f(ctx.as_ref())
}

/// Invalidator of the instance currently rendering.
pub fn current_invalidator() -> Invalidator {
    with_context(|ctx| match ctx {
        Some(ctx) => ctx.invalidate.clone(),
        None => Invalidator::detached(),
    })
}

/// Slot-based remember (sequential composition only)
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    with_context(|ctx| match ctx {
        Some(ctx) => ctx.composer.borrow_mut().remember(init),
        None => {
            log::warn!("remember called outside of Host::render; value is not retained");
            Rc::new(init())
        }
    })
}

/// Key-based remember
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    let key = key.into();
    with_context(|ctx| match ctx {
        Some(ctx) => ctx.composer.borrow_mut().remember_with_key(key, init),
        None => {
            log::warn!("remember_with_key('{key}') called outside of Host::render; value is not retained");
            Rc::new(init())
        }
    })
}

pub fn remember_state<T: 'static>(init: impl FnOnce() -> T) -> Rc<RefCell<T>> {
    remember(|| RefCell::new(init()))
}

pub fn remember_state_with_key<T: 'static>(
    key: impl Into<String>,
    init: impl FnOnce() -> T,
) -> Rc<RefCell<T>> {
    remember_with_key(key, || RefCell::new(init()))
}
