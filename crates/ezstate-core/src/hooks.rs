//! Hooks built on remembered slots.
//!
//! These are the three primitives a state utility composes: a state cell
//! that re-renders its owner on change, a callback with a stable identity,
//! and a mutable reference slot.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::runtime::{Invalidator, current_invalidator, remember};
use crate::scope::scoped_effect;
use crate::signal::{Signal, signal};

struct StateCell<T: 'static> {
    value: Signal<T>,
    invalidate: Invalidator,
}

/// Setter returned by [`use_state`]. Clones share the same cell.
pub struct StateSetter<T: 'static> {
    cell: Rc<StateCell<T>>,
}

impl<T> Clone for StateSetter<T> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
        }
    }
}

impl<T> PartialEq for StateSetter<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl<T> fmt::Debug for StateSetter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateSetter")
            .field("cell", &Rc::as_ptr(&self.cell))
            .finish()
    }
}

impl<T: Clone + 'static> StateSetter<T> {
    pub fn set(&self, value: T) {
        self.transition(move |_| value);
    }

    /// Apply `f` to the latest value, not the value of the last render.
    ///
    /// Transitions are applied eagerly and in call order. A panic in `f`
    /// propagates to the caller and leaves the value untouched.
    pub fn transition(&self, f: impl FnOnce(&T) -> T) {
        if !self.cell.invalidate.is_mounted() {
            log::warn!("state update on an unmounted component ignored");
            return;
        }
        self.cell.value.replace_with(f);
        self.cell.invalidate.invalidate();
    }

    /// Like [`transition`](Self::transition), but does not invalidate the
    /// owner when the next value equals the current one.
    pub fn set_if_changed(&self, f: impl FnOnce(&T) -> T) -> bool
    where
        T: PartialEq,
    {
        if !self.cell.invalidate.is_mounted() {
            log::warn!("state update on an unmounted component ignored");
            return false;
        }
        let current = self.cell.value.get();
        let next = f(&current);
        if next == current {
            log::trace!("state transition skipped: value unchanged");
            return false;
        }
        self.cell.value.set(next);
        self.cell.invalidate.invalidate();
        true
    }

    /// Latest value, including transitions not yet rendered.
    pub fn current(&self) -> T {
        self.cell.value.get()
    }
}

/// State cell bound to the rendering instance.
///
/// `init` runs once, on the first render. Returns this render's snapshot
/// and a setter whose identity never changes.
pub fn use_state<T: Clone + 'static>(init: impl FnOnce() -> T) -> (T, StateSetter<T>) {
    let cell = remember(|| {
        let invalidate = current_invalidator();
        StateCell {
            value: signal(init()),
            invalidate,
        }
    });
    let setter = StateSetter { cell };
    (setter.current(), setter)
}

/// Single-slot mutable reference; writes do not re-render.
pub fn use_ref<T: 'static>(init: impl FnOnce() -> T) -> Rc<RefCell<T>> {
    remember(|| RefCell::new(init()))
}

/// Callback with reference identity.
pub struct Callback<A: 'static, R: 'static = ()>(Rc<dyn Fn(A) -> R>);

impl<A, R> Callback<A, R> {
    pub fn new(f: impl Fn(A) -> R + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, arg: A) -> R {
        (self.0)(arg)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<A, R> Clone for Callback<A, R> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<A, R> PartialEq for Callback<A, R> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<A, R> fmt::Debug for Callback<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Rc::as_ptr(&self.0))
    }
}

/// Memoize `f` for the lifetime of the instance.
///
/// Only the first render's closure is kept. To see later values, read them
/// through a [`use_ref`] slot from inside the callback.
pub fn use_callback<A: 'static, R: 'static>(f: impl Fn(A) -> R + 'static) -> Callback<A, R> {
    let cb = remember(|| Callback::new(f));
    (*cb).clone()
}

/// Run `f` on unmount of the rendering instance. Registered once.
pub fn use_unmount(f: impl FnOnce() + 'static) {
    let registered = remember(|| RefCell::new(false));
    if registered.replace(true) {
        return;
    }
    scoped_effect(move || -> Box<dyn FnOnce()> { Box::new(f) });
}
