//! crates/logging/src/state.rs
//! Process-wide active logger and severity threshold.
//!
//! Both slots live in `static`s and are never torn down, so logging from
//! atexit handlers or thread-local destructors keeps reaching the last
//! installed logger. Reads are lock-free: the threshold is an atomic byte and
//! the logger is an [`ArcSwap`], so a reader never waits on a concurrent
//! [`set_logger`].

use std::fmt::{self, Write as _};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;

use crate::level::LogLevel;
use crate::logger::{IntoLogger, Logger};
use crate::message::LogMsg;
use crate::stream::std_logger;

/// Threshold in effect before the first [`set_log_level`] call.
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

static LEVEL: AtomicU8 = AtomicU8::new(DEFAULT_LOG_LEVEL as u8);

// `ArcSwap` needs a sized pointee, hence the nested `Arc`.
static LOGGER: LazyLock<ArcSwap<Arc<dyn Logger>>> =
    LazyLock::new(|| ArcSwap::from_pointee(std_logger()));

/// Returns the current log level.
#[inline]
#[must_use]
pub fn get_log_level() -> LogLevel {
    LogLevel::from_u8(LEVEL.load(Ordering::Acquire))
}

/// Sets the log level for all threads and returns the previous level.
///
/// The swap itself is atomic, but a `get_log_level` followed by a
/// `set_log_level` is not: two threads raising and restoring the level can
/// race.
pub fn set_log_level(level: LogLevel) -> LogLevel {
    LogLevel::from_u8(LEVEL.swap(level as u8, Ordering::AcqRel))
}

/// Returns `true` if `level` is at least as severe as the current log level.
///
/// Call this before formatting a message; [`write_log`] itself never filters.
///
/// ```
/// use logging::{LogLevel, is_log_level};
///
/// // Crit is enabled under every threshold.
/// assert!(is_log_level(LogLevel::Crit));
/// ```
#[inline(always)]
#[must_use]
pub fn is_log_level(level: LogLevel) -> bool {
    level.is_at_least(get_log_level())
}

/// Returns the current logger.
#[must_use]
pub fn get_logger() -> Arc<dyn Logger> {
    Arc::clone(&**LOGGER.load())
}

/// Installs `logger` for all threads and returns the previous logger.
///
/// Passing `None` installs the [`null_logger`](crate::null_logger). Handing the returned logger
/// back to `set_logger` restores the previous state exactly.
///
/// ```
/// use std::sync::Arc;
/// use logging::{Logger, get_logger, null_logger, set_logger};
///
/// let previous = set_logger(None);
/// assert!(Arc::ptr_eq(&get_logger(), &null_logger()));
///
/// set_logger(previous.clone());
/// assert!(Arc::ptr_eq(&get_logger(), &previous));
/// ```
pub fn set_logger<L: IntoLogger>(logger: L) -> Arc<dyn Logger> {
    let previous = LOGGER.swap(Arc::new(logger.into_logger()));
    Arc::unwrap_or_clone(previous)
}

/// Unconditionally writes `size` bytes of `msg` to the current logger.
///
/// No threshold check is made here; callers are expected to test
/// [`is_log_level`] before formatting the message.
#[inline]
pub fn write_log(level: LogLevel, msg: LogMsg, size: usize) {
    LOGGER.load().write_log(level, msg, size);
}

/// Formats `args` into a fresh [`LogMsg`] and writes it to the current logger.
///
/// Like [`write_log`] this does not consult the log level. Output longer than
/// [`MAX_LOG_LINE`](crate::MAX_LOG_LINE) is truncated.
pub fn write_log_fmt(level: LogLevel, args: fmt::Arguments<'_>) {
    let mut msg = LogMsg::new();
    let _ = msg.write_fmt(args);
    let size = msg.len();
    write_log(level, msg, size);
}

/// Serialises unit tests that touch the process-wide slots.
#[cfg(test)]
pub(crate) fn lock_state() -> std::sync::MutexGuard<'static, ()> {
    static STATE_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    STATE_LOCK
        .lock()
        .unwrap_or_else(|poison| poison.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::null_logger;
    use std::sync::Mutex;
    use std::thread;

    #[derive(Default)]
    struct Recording {
        lines: Mutex<Vec<(LogLevel, Vec<u8>)>>,
    }

    impl Logger for Recording {
        fn write_log(&self, level: LogLevel, msg: LogMsg, size: usize) {
            self.lines
                .lock()
                .unwrap()
                .push((level, msg.bytes(size).to_vec()));
        }
    }

    #[test]
    fn set_log_level_returns_previous() {
        let _lock = lock_state();
        let original = set_log_level(LogLevel::Warning);
        assert_eq!(get_log_level(), LogLevel::Warning);
        assert_eq!(set_log_level(LogLevel::Debug), LogLevel::Warning);
        assert_eq!(get_log_level(), LogLevel::Debug);
        set_log_level(original);
    }

    #[test]
    fn is_log_level_follows_threshold() {
        let _lock = lock_state();
        let original = set_log_level(LogLevel::Notice);
        assert!(is_log_level(LogLevel::Crit));
        assert!(is_log_level(LogLevel::Notice));
        assert!(!is_log_level(LogLevel::Info));
        assert!(!is_log_level(LogLevel::Debug));
        set_log_level(original);
    }

    #[test]
    fn threshold_is_visible_across_threads() {
        let _lock = lock_state();
        let original = set_log_level(LogLevel::Error);
        let seen = thread::spawn(|| (get_log_level(), is_log_level(LogLevel::Warning)))
            .join()
            .unwrap();
        assert_eq!(seen, (LogLevel::Error, false));
        set_log_level(original);
    }

    #[test]
    fn set_logger_round_trips() {
        let _lock = lock_state();
        let recording: Arc<dyn Logger> = Arc::new(Recording::default());
        let previous = set_logger(Arc::clone(&recording));
        assert!(Arc::ptr_eq(&get_logger(), &recording));

        let replaced = set_logger(Arc::clone(&previous));
        assert!(Arc::ptr_eq(&replaced, &recording));
        assert!(Arc::ptr_eq(&get_logger(), &previous));
    }

    #[test]
    fn set_logger_none_installs_null_logger() {
        let _lock = lock_state();
        let previous = set_logger(None);
        assert!(Arc::ptr_eq(&get_logger(), &null_logger()));
        set_logger(previous);
    }

    #[test]
    fn write_log_does_not_filter() {
        let _lock = lock_state();
        let recording = Arc::new(Recording::default());
        let previous = set_logger(Arc::clone(&recording) as Arc<dyn Logger>);
        let original = set_log_level(LogLevel::Crit);

        write_log(LogLevel::Debug, LogMsg::from_bytes(b"unfiltered"), 10);
        write_log_fmt(LogLevel::Info, format_args!("n={}", 7));

        set_log_level(original);
        set_logger(previous);

        let lines = recording.lines.lock().unwrap();
        assert_eq!(
            lines.as_slice(),
            &[
                (LogLevel::Debug, b"unfiltered".to_vec()),
                (LogLevel::Info, b"n=7".to_vec()),
            ]
        );
    }

    #[test]
    fn logger_is_visible_across_threads() {
        let _lock = lock_state();
        let recording = Arc::new(Recording::default());
        let previous = set_logger(Arc::clone(&recording) as Arc<dyn Logger>);

        thread::scope(|scope| {
            for id in 0..4 {
                scope.spawn(move || {
                    write_log_fmt(LogLevel::Notice, format_args!("thread {id}"));
                });
            }
        });

        set_logger(previous);
        assert_eq!(recording.lines.lock().unwrap().len(), 4);
    }
}
