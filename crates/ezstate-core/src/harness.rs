//! Render a hook outside of any UI, the way a component would.
//!
//! ```rust
//! use ezstate_core::*;
//!
//! let mut h = render_hook((), |_| use_state(|| 1));
//! h.act(|(_, set)| set.transition(|v| v + 1));
//! assert_eq!(h.result().0, 2);
//! ```

use crate::error::{HostError, catch_panic};
use crate::runtime::Host;

/// Upper bound on renders per flush.
pub const MAX_RENDERS_PER_FLUSH: usize = 50;

/// A mounted hook plus the props it was last rendered with.
pub struct HookHarness<P: 'static, R: 'static> {
    host: Host,
    hook: Box<dyn FnMut(&P) -> R>,
    props: P,
    result: R,
}

/// Mount `hook` in a fresh host and render it once with `props`.
pub fn render_hook<P: 'static, R: 'static>(
    props: P,
    hook: impl FnMut(&P) -> R + 'static,
) -> HookHarness<P, R> {
    let mut host = Host::new();
    let mut hook: Box<dyn FnMut(&P) -> R> = Box::new(hook);
    let result = host.compose(|| hook(&props));
    let mut harness = HookHarness {
        host,
        hook,
        props,
        result,
    };
    // State set during the first render is picked up right away.
    if let Err(e) = harness.flush() {
        log::error!("render_hook: {e}");
    }
    harness
}

impl<P, R> HookHarness<P, R> {
    /// Value returned by the latest render.
    pub fn result(&self) -> &R {
        &self.result
    }

    pub fn props(&self) -> &P {
        &self.props
    }

    pub fn render_count(&self) -> usize {
        self.host.render_count()
    }

    pub fn is_mounted(&self) -> bool {
        self.host.is_mounted()
    }

    /// Render again with new props, then flush pending state.
    pub fn rerender(&mut self, props: P) {
        if !self.host.is_mounted() {
            log::warn!("rerender on an unmounted hook ignored");
            return;
        }
        self.props = props;
        self.render_once();
        if let Err(e) = self.flush() {
            log::error!("rerender: {e}");
        }
    }

    /// Run `f` against the latest result, then re-render until state settles.
    ///
    /// Panics raised by `f` propagate; see [`try_act`](Self::try_act).
    pub fn act(&mut self, f: impl FnOnce(&R)) {
        f(&self.result);
        if let Err(e) = self.flush() {
            log::error!("act: {e}");
        }
    }

    /// [`act`](Self::act) behind an error boundary.
    ///
    /// A panic in `f` is reported as [`HostError::Panicked`]; state changes
    /// made before the panic are still flushed.
    pub fn try_act(&mut self, f: impl FnOnce(&R)) -> Result<(), HostError> {
        if !self.host.is_mounted() {
            return Err(HostError::Unmounted);
        }
        let outcome = catch_panic(|| f(&self.result));
        self.flush()?;
        outcome
    }

    pub fn unmount(&mut self) {
        self.host.unmount();
    }

    fn render_once(&mut self) {
        let hook = &mut self.hook;
        let props = &self.props;
        self.result = self.host.compose(|| hook(props));
    }

    fn flush(&mut self) -> Result<(), HostError> {
        let mut renders = 0;
        while self.host.is_dirty() {
            if renders == MAX_RENDERS_PER_FLUSH {
                return Err(HostError::RenderLoop { renders });
            }
            self.render_once();
            renders += 1;
        }
        Ok(())
    }
}
