use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// A render or an event handler panicked.
    #[error("panicked: {message}")]
    Panicked { message: String },
    #[error("host is unmounted")]
    Unmounted,
    /// State kept changing while flushing.
    #[error("too many re-renders ({renders}); state never settled")]
    RenderLoop { renders: usize },
}

/// Error boundary: run `f`, turning a panic into [`HostError::Panicked`].
pub fn catch_panic<R>(f: impl FnOnce() -> R) -> Result<R, HostError> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|err| {
        let message = panic_message(err.as_ref());
        log::error!("caught panic at host boundary: {message}");
        HostError::Panicked { message }
    })
}

fn panic_message(err: &(dyn Any + Send)) -> String {
    if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    }
}
