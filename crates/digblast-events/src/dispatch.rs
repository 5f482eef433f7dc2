//! Panic guard for event resolution.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Run `f`, turning a panic into `Err` with its message so that one bad
/// event cannot take down the dispatching thread.
pub fn guarded<R>(f: impl FnOnce() -> R) -> Result<R, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| panic_message(payload.as_ref()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
