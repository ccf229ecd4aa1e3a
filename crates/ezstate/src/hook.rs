use std::cell::RefCell;
use std::fmt;

use ezstate_core::{Callback, remember, use_callback, use_ref, use_state};

use crate::aggregate::Aggregate;
use crate::patch::Patch;
use crate::policy::MergePolicy;

/// `(state, update, reset)` as returned by [`use_ez_state`].
pub type EzState<T> = (T, Update<T>, Reset);

/// Merge-based updater. The same handle is returned on every render.
pub struct Update<T: Aggregate>(Callback<Patch<T>>);

impl<T: Aggregate> Update<T> {
    /// Resolve `patch` against the latest state and merge it in with the
    /// policy supplied on the most recent render.
    pub fn apply(&self, patch: Patch<T>) {
        self.0.call(patch)
    }

    pub fn merge(&self, patch: T::Patch) {
        self.apply(Patch::Partial(patch))
    }

    /// `f` must not call `update` itself: the enclosing update is merged
    /// last and overwrites whatever the nested one wrote. Doing so logs a
    /// warning.
    pub fn derive(&self, f: impl FnOnce(&T) -> T::Patch + 'static) {
        self.apply(Patch::derive(f))
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

/// Restores the state captured on the first render.
#[derive(Clone, PartialEq, Debug)]
pub struct Reset(Callback<()>);

impl Reset {
    /// Idempotent: resetting an already-initial state changes nothing.
    pub fn reset(&self) {
        self.0.call(())
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.0.ptr_eq(&other.0)
    }
}

impl<T: Aggregate> Clone for Update<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Aggregate> PartialEq for Update<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T: Aggregate> fmt::Debug for Update<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Update").field(&self.0).finish()
    }
}

/// Marks a patch as being resolved; restores the previous flag on drop,
/// unwinding included.
struct Resolving<'a> {
    flag: &'a RefCell<bool>,
    prev: bool,
}

impl<'a> Resolving<'a> {
    fn enter(flag: &'a RefCell<bool>) -> Self {
        let prev = flag.replace(true);
        Self { flag, prev }
    }
}

impl Drop for Resolving<'_> {
    fn drop(&mut self) {
        self.flag.replace(self.prev);
    }
}

/// Aggregate state with the default shallow-merge policy, or `policy`
/// when given.
///
/// `initial` is only read on the first render; it is kept as the reset
/// target for the lifetime of the instance.
pub fn use_ez_state<T: Aggregate>(initial: T, policy: Option<MergePolicy<T>>) -> EzState<T> {
    use_ez_state_with(initial, policy.unwrap_or_default())
}

/// [`use_ez_state`] with a required policy; accepts closures directly.
pub fn use_ez_state_with<T: Aggregate>(
    initial: T,
    policy: impl Into<MergePolicy<T>>,
) -> EzState<T> {
    let policy = policy.into();

    let snapshot = remember(|| initial.clone());
    let (state, setter) = use_state(move || initial);

    // Read at call time, so updates follow the latest render's policy.
    let latest = use_ref(|| policy.clone());
    *latest.borrow_mut() = policy;

    // Lets a repeated reset skip invalidating the host.
    let pristine = use_ref(|| true);
    // Set while a patch or policy runs.
    let resolving = use_ref(|| false);

    let update = use_callback({
        let setter = setter.clone();
        let pristine = pristine.clone();
        move |patch: Patch<T>| {
            if *resolving.borrow() {
                log::warn!(
                    "ez_state: update issued from inside a patch function or merge policy; \
                     the enclosing update will overwrite it"
                );
            }
            let policy = latest.borrow().clone();
            setter.transition(|current| {
                let _resolving = Resolving::enter(&resolving);
                let resolved = patch.resolve(current);
                policy.apply(current, resolved)
            });
            *pristine.borrow_mut() = false;
            log::trace!("ez_state: update applied");
        }
    });

    let reset = use_callback(move |()| {
        if pristine.replace(true) {
            log::trace!("ez_state: reset skipped, state already initial");
            return;
        }
        let initial = (*snapshot).clone();
        setter.set(initial);
        log::debug!("ez_state: reset to initial state");
    });

    (state, Update(update), Reset(reset))
}
