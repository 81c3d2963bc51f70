#![forbid(unsafe_code)]

//! Logging shim.
//!
//! With the `tracing` feature the engine logs through `tracing`. Without it
//! the same macro names expand to nothing, so call sites never need a `cfg`.

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op debug macro when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
}
