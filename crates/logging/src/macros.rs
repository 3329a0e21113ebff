//! crates/logging/src/macros.rs
//! Level-checked logging macros.
//!
//! Each macro tests [`is_log_level`](crate::is_log_level) first and only
//! formats its arguments when the level is enabled, so suppressed messages
//! cost one atomic load.

/// Logs a formatted message at an explicit level.
///
/// # Example
/// ```
/// use logging::{LogLevel, log_at};
///
/// log_at!(LogLevel::Notice, "listening on port {}", 873);
/// ```
#[macro_export]
macro_rules! log_at {
    ($level:expr, $($arg:tt)+) => {{
        let level: $crate::LogLevel = $level;
        if $crate::is_log_level(level) {
            $crate::write_log_fmt(level, ::std::format_args!($($arg)+));
        }
    }};
}

/// Logs a critical message.
///
/// # Example
/// ```ignore
/// log_crit!("state file corrupt: {}", path.display());
/// ```
#[macro_export]
macro_rules! log_crit {
    ($($arg:tt)+) => {
        $crate::log_at!($crate::LogLevel::Crit, $($arg)+)
    };
}

/// Logs an error message.
///
/// # Example
/// ```ignore
/// log_error!("connect failed: {err}");
/// ```
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)+) => {
        $crate::log_at!($crate::LogLevel::Error, $($arg)+)
    };
}

/// Logs a warning message.
#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)+) => {
        $crate::log_at!($crate::LogLevel::Warning, $($arg)+)
    };
}

/// Logs a notice message.
#[macro_export]
macro_rules! log_notice {
    ($($arg:tt)+) => {
        $crate::log_at!($crate::LogLevel::Notice, $($arg)+)
    };
}

/// Logs an informational message.
///
/// # Example
/// ```ignore
/// log_info!("loaded {} entries", entries.len());
/// ```
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)+) => {
        $crate::log_at!($crate::LogLevel::Info, $($arg)+)
    };
}

/// Logs a debug message.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)+) => {
        $crate::log_at!($crate::LogLevel::Debug, $($arg)+)
    };
}
