//! crates/logging/src/logger.rs
//! The [`Logger`] sink trait and the discarding [`NullLogger`].

use std::sync::{Arc, LazyLock};

use crate::level::LogLevel;
use crate::message::LogMsg;

/// A sink that durably records formatted log lines.
///
/// Implementations receive ownership of the message and must release it
/// before returning. `write_log` is infallible: I/O errors, closed streams and
/// similar failures are absorbed inside the sink and never reach the caller.
///
/// The `size` argument is the number of bytes of `msg` to emit. Implementations
/// must not read beyond it; [`LogMsg::bytes`] does the clamping.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use logging::{LogLevel, LogMsg, Logger};
///
/// #[derive(Default)]
/// struct Counting(AtomicUsize);
///
/// impl Logger for Counting {
///     fn write_log(&self, _level: LogLevel, msg: LogMsg, size: usize) {
///         self.0.fetch_add(msg.bytes(size).len(), Ordering::Relaxed);
///     }
/// }
///
/// let sink = Counting::default();
/// sink.write_log(LogLevel::Info, LogMsg::from_bytes(b"hello"), 5);
/// assert_eq!(sink.0.load(Ordering::Relaxed), 5);
/// ```
pub trait Logger: Send + Sync {
    /// Unconditionally writes `size` bytes of `msg` at `level`.
    fn write_log(&self, level: LogLevel, msg: LogMsg, size: usize);
}

impl<T: Logger + ?Sized> Logger for &T {
    fn write_log(&self, level: LogLevel, msg: LogMsg, size: usize) {
        (**self).write_log(level, msg, size);
    }
}

impl<T: Logger + ?Sized> Logger for Box<T> {
    fn write_log(&self, level: LogLevel, msg: LogMsg, size: usize) {
        (**self).write_log(level, msg, size);
    }
}

impl<T: Logger + ?Sized> Logger for Arc<T> {
    fn write_log(&self, level: LogLevel, msg: LogMsg, size: usize) {
        (**self).write_log(level, msg, size);
    }
}

/// Logger that discards everything, the equivalent of `/dev/null`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    #[inline]
    fn write_log(&self, _level: LogLevel, msg: LogMsg, _size: usize) {
        drop(msg);
    }
}

static NULL_LOGGER: LazyLock<Arc<dyn Logger>> = LazyLock::new(|| Arc::new(NullLogger));

/// Returns the shared null logger.
///
/// Every call returns the same instance, so it can be compared with
/// [`Arc::ptr_eq`] against [`get_logger`](crate::get_logger).
#[must_use]
pub fn null_logger() -> Arc<dyn Logger> {
    Arc::clone(&NULL_LOGGER)
}

/// Argument accepted by [`set_logger`](crate::set_logger) and
/// [`ScopedLogger::new`](crate::ScopedLogger::new).
///
/// `None` stands for the [`null_logger`].
pub trait IntoLogger {
    /// Resolves to the logger to install.
    fn into_logger(self) -> Arc<dyn Logger>;
}

impl IntoLogger for Arc<dyn Logger> {
    fn into_logger(self) -> Arc<dyn Logger> {
        self
    }
}

impl IntoLogger for Option<Arc<dyn Logger>> {
    fn into_logger(self) -> Arc<dyn Logger> {
        self.unwrap_or_else(null_logger)
    }
}
