//! # Host runtime for ezstate
//!
//! A small composition host: just enough of a component runtime to give
//! hooks somewhere to live. There are four pieces:
//!
//! - `Signal<T>` — observable value cell with subscribers.
//! - `remember*` — storage bound to one mounted instance (`Host`).
//! - `use_state` / `use_ref` / `use_callback` — hooks on top of `remember`.
//! - `render_hook` — a harness that mounts a hook and drives it.
//!
//! ## Signals
//!
//! ```rust
//! use ezstate_core::*;
//!
//! let count = signal(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! ## Remembered state
//!
//! `remember` is order-based: the Nth call during a render always refers
//! to the Nth stored value. `remember_with_key` is key-based and stable
//! across conditional branches.
//!
//! ```rust
//! use ezstate_core::*;
//!
//! let mut host = Host::new();
//! let first = host.render(|| remember(|| 7)).unwrap();
//! let again = host.render(|| remember(|| 8)).unwrap();
//! assert!(std::rc::Rc::ptr_eq(&first, &again));
//! assert_eq!(*again, 7);
//! ```
//!
//! ## Hooks
//!
//! A `use_state` setter invalidates its host; the owner re-renders when it
//! flushes. `render_hook` does that for you after every `act`:
//!
//! ```rust
//! use ezstate_core::*;
//!
//! let mut h = render_hook((), |_| use_state(|| 0));
//! h.act(|(_, set)| {
//!     set.transition(|v| v + 1);
//!     set.transition(|v| v + 1);
//! });
//! assert_eq!(h.result().0, 2);
//! assert_eq!(h.render_count(), 2);
//! ```
//!
//! Everything here is `Rc`-based and single-threaded: one host per thread.

pub mod error;
pub mod harness;
pub mod hooks;
pub mod prelude;
pub mod runtime;
pub mod scope;
pub mod signal;

pub use error::*;
pub use harness::*;
pub use hooks::*;
pub use prelude::*;
pub use runtime::*;
pub use scope::*;
pub use signal::*;
