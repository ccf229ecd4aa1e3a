use std::fmt;
use std::rc::Rc;

use crate::aggregate::Aggregate;

/// How a resolved patch combines with the current state.
///
/// Any `Fn(&T, T::Patch) -> T` converts into a policy, so callers can pass
/// a closure where a policy is expected.
pub struct MergePolicy<T: Aggregate>(Rc<dyn Fn(&T, T::Patch) -> T>);

impl<T: Aggregate> MergePolicy<T> {
    pub fn new(f: impl Fn(&T, T::Patch) -> T + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// [`Aggregate::shallow_merge`].
    pub fn shallow() -> Self {
        Self::new(T::shallow_merge)
    }

    pub fn apply(&self, current: &T, patch: T::Patch) -> T {
        (self.0)(current, patch)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: Aggregate> Default for MergePolicy<T> {
    fn default() -> Self {
        Self::shallow()
    }
}

impl<T: Aggregate> Clone for MergePolicy<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Aggregate> fmt::Debug for MergePolicy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MergePolicy({:p})", Rc::as_ptr(&self.0))
    }
}

impl<T, F> From<F> for MergePolicy<T>
where
    T: Aggregate,
    F: Fn(&T, T::Patch) -> T + 'static,
{
    fn from(f: F) -> Self {
        Self::new(f)
    }
}
