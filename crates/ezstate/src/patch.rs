use std::fmt;

use crate::aggregate::Aggregate;

type Derive<T> = Box<dyn FnOnce(&T) -> <T as Aggregate>::Patch>;

/// Partial update passed to [`Update::apply`](crate::Update::apply).
pub enum Patch<T: Aggregate> {
    /// Literal subset of keys with their new values.
    Partial(T::Patch),
    /// Computed from the latest state when the update runs.
    Derive(Derive<T>),
}

impl<T: Aggregate> Patch<T> {
    pub fn partial(patch: T::Patch) -> Self {
        Patch::Partial(patch)
    }

    pub fn derive(f: impl FnOnce(&T) -> T::Patch + 'static) -> Self {
        Patch::Derive(Box::new(f))
    }

    pub fn resolve(self, current: &T) -> T::Patch {
        match self {
            Patch::Partial(p) => p,
            Patch::Derive(f) => f(current),
        }
    }
}

impl<T: Aggregate> fmt::Debug for Patch<T>
where
    T::Patch: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Patch::Partial(p) => f.debug_tuple("Partial").field(p).finish(),
            Patch::Derive(_) => f.write_str("Derive(..)"),
        }
    }
}
