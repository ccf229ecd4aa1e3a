use std::cell::{Cell, RefCell};
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// Handle returned by [`Signal::subscribe`], used to unsubscribe.
    pub struct SubscriberId;
}

type Subscriber<T> = Rc<dyn Fn(&T)>;

/// Observable single-writer value cell.
///
/// Cloning a `Signal` clones the handle, not the value.
pub struct Signal<T: 'static>(Rc<Inner<T>>);

struct Inner<T> {
    value: RefCell<T>,
    subs: RefCell<SlotMap<SubscriberId, Subscriber<T>>>,
    notifying: Cell<bool>,
    // A write landed while subscribers were running.
    pending: Cell<bool>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(Inner {
            value: RefCell::new(value),
            subs: RefCell::new(SlotMap::with_key()),
            notifying: Cell::new(false),
            pending: Cell::new(false),
        }))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.value.borrow().clone()
    }

    /// Borrow the value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.value.borrow())
    }

    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubscriberId {
        self.0.subs.borrow_mut().insert(Rc::new(f))
    }

    /// Returns `false` if the id was already removed.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.0.subs.borrow_mut().remove(id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.0.subs.borrow().len()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Writes notify subscribers with a clone of the new value; no borrow of
/// the signal is held while they run, so a subscriber may write to it.
/// Such nested writes do not recurse: they are coalesced into one more
/// notification round carrying the latest value.
impl<T: Clone> Signal<T> {
    pub fn set(&self, v: T) {
        *self.0.value.borrow_mut() = v;
        self.notify();
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        f(&mut self.0.value.borrow_mut());
        self.notify();
    }

    /// Compute the next value from a clone of the current one.
    ///
    /// No borrow is held while `f` runs, so `f` may read this signal. If `f`
    /// panics the stored value is left untouched.
    pub fn replace_with<F: FnOnce(&T) -> T>(&self, f: F) {
        let current = self.get();
        let next = f(&current);
        self.set(next);
    }

    fn notify(&self) {
        if self.0.notifying.replace(true) {
            self.0.pending.set(true);
            return;
        }

        // Clears the flag on unwind too.
        struct Done<'a>(&'a Cell<bool>);
        impl Drop for Done<'_> {
            fn drop(&mut self) {
                self.0.set(false);
            }
        }
        let _done = Done(&self.0.notifying);

        loop {
            self.0.pending.set(false);
            // Snapshot so subscribers can (un)subscribe.
            let subs: Vec<Subscriber<T>> = self.0.subs.borrow().values().cloned().collect();
            let value = self.get();
            for s in &subs {
                s(&value);
            }
            if !self.0.pending.get() {
                break;
            }
        }
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}
