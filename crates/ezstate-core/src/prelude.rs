pub use crate::error::{HostError, catch_panic};
pub use crate::harness::{HookHarness, render_hook};
pub use crate::hooks::{Callback, StateSetter, use_callback, use_ref, use_state, use_unmount};
pub use crate::runtime::{
    Host, Invalidator, remember, remember_state, remember_state_with_key, remember_with_key,
};
pub use crate::scope::{Scope, current_scope, scoped_effect};
pub use crate::signal::{Signal, SubscriberId, signal};
