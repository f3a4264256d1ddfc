//! Conditional logging macros gated on a module-level `ENABLE_LOGS` flag,
//! so chatty modules (the monitor loop) can be silenced without touching
//! the global filter.
//!
//! Each module using them defines the flag first:
//! ```rust
//! const ENABLE_LOGS: bool = true;
//! ```
//! then imports the macros from the crate root:
//! ```rust,ignore
//! use crate::{log_error, log_info, log_warn};
//! ```

/// Info-level logging, gated on the calling module's `ENABLE_LOGS` const.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Warn-level logging, gated on the calling module's `ENABLE_LOGS` const.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// Error-level logging, gated on the calling module's `ENABLE_LOGS` const.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}
