//! crates/logging-sink/src/syslog.rs
//! syslog(3) backend for the process-wide logger.
//!
//! Uses libc `openlog`/`syslog`/`closelog` directly rather than a dedicated
//! syslog crate. Each message is sent as `syslog(priority, "%.*s", size, msg)`.

#![allow(unsafe_code)]

use std::ffi::CString;
use std::fmt;
use std::ptr;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard};

use logging::{LogLevel, LogMsg, Logger};

/// Syslog facility codes matching the POSIX syslog(3) constants.
///
/// Each variant corresponds to a `LOG_*` facility from `<syslog.h>`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[repr(i32)]
pub enum SyslogFacility {
    /// Kernel messages (LOG_KERN).
    Kern = libc::LOG_KERN,
    /// User-level messages (LOG_USER). syslog(3) uses this when no facility
    /// has been opened.
    #[default]
    User = libc::LOG_USER,
    /// Mail system (LOG_MAIL).
    Mail = libc::LOG_MAIL,
    /// System daemons (LOG_DAEMON).
    Daemon = libc::LOG_DAEMON,
    /// Security/authorization messages (LOG_AUTH).
    Auth = libc::LOG_AUTH,
    /// Messages generated internally by syslogd (LOG_SYSLOG).
    Syslog = libc::LOG_SYSLOG,
    /// Line printer subsystem (LOG_LPR).
    Lpr = libc::LOG_LPR,
    /// Network news subsystem (LOG_NEWS).
    News = libc::LOG_NEWS,
    /// UUCP subsystem (LOG_UUCP).
    Uucp = libc::LOG_UUCP,
    /// Clock daemon (LOG_CRON).
    Cron = libc::LOG_CRON,
    /// Reserved for local use (LOG_LOCAL0).
    Local0 = libc::LOG_LOCAL0,
    /// Reserved for local use (LOG_LOCAL1).
    Local1 = libc::LOG_LOCAL1,
    /// Reserved for local use (LOG_LOCAL2).
    Local2 = libc::LOG_LOCAL2,
    /// Reserved for local use (LOG_LOCAL3).
    Local3 = libc::LOG_LOCAL3,
    /// Reserved for local use (LOG_LOCAL4).
    Local4 = libc::LOG_LOCAL4,
    /// Reserved for local use (LOG_LOCAL5).
    Local5 = libc::LOG_LOCAL5,
    /// Reserved for local use (LOG_LOCAL6).
    Local6 = libc::LOG_LOCAL6,
    /// Reserved for local use (LOG_LOCAL7).
    Local7 = libc::LOG_LOCAL7,
}

impl SyslogFacility {
    /// Every facility, in `<syslog.h>` order.
    pub const ALL: [Self; 18] = [
        Self::Kern,
        Self::User,
        Self::Mail,
        Self::Daemon,
        Self::Auth,
        Self::Syslog,
        Self::Lpr,
        Self::News,
        Self::Uucp,
        Self::Cron,
        Self::Local0,
        Self::Local1,
        Self::Local2,
        Self::Local3,
        Self::Local4,
        Self::Local5,
        Self::Local6,
        Self::Local7,
    ];

    /// Parses a case-insensitive facility name such as `"daemon"` or
    /// `"LOCAL3"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging_sink::syslog::SyslogFacility;
    ///
    /// assert_eq!(SyslogFacility::from_name("LOCAL3"), Some(SyslogFacility::Local3));
    /// assert_eq!(SyslogFacility::from_name("unknown"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|facility| facility.as_str().eq_ignore_ascii_case(name))
    }

    /// Returns the lower-case facility name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kern => "kern",
            Self::User => "user",
            Self::Mail => "mail",
            Self::Daemon => "daemon",
            Self::Auth => "auth",
            Self::Syslog => "syslog",
            Self::Lpr => "lpr",
            Self::News => "news",
            Self::Uucp => "uucp",
            Self::Cron => "cron",
            Self::Local0 => "local0",
            Self::Local1 => "local1",
            Self::Local2 => "local2",
            Self::Local3 => "local3",
            Self::Local4 => "local4",
            Self::Local5 => "local5",
            Self::Local6 => "local6",
            Self::Local7 => "local7",
        }
    }
}

impl fmt::Display for SyslogFacility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Syslog priority levels matching POSIX syslog(3) severity constants.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(i32)]
pub enum SyslogPriority {
    /// System is unusable (LOG_EMERG).
    Emergency = libc::LOG_EMERG,
    /// Action must be taken immediately (LOG_ALERT).
    Alert = libc::LOG_ALERT,
    /// Critical conditions (LOG_CRIT).
    Critical = libc::LOG_CRIT,
    /// Error conditions (LOG_ERR).
    Error = libc::LOG_ERR,
    /// Warning conditions (LOG_WARNING).
    Warning = libc::LOG_WARNING,
    /// Normal but significant condition (LOG_NOTICE).
    Notice = libc::LOG_NOTICE,
    /// Informational messages (LOG_INFO).
    Info = libc::LOG_INFO,
    /// Debug-level messages (LOG_DEBUG).
    Debug = libc::LOG_DEBUG,
}

/// Maps a [`LogLevel`] onto the syslog priority of the same name.
///
/// `Emergency` and `Alert` have no log level and are never produced.
pub const fn priority_for(level: LogLevel) -> SyslogPriority {
    match level {
        LogLevel::Crit => SyslogPriority::Critical,
        LogLevel::Error => SyslogPriority::Error,
        LogLevel::Warning => SyslogPriority::Warning,
        LogLevel::Notice => SyslogPriority::Notice,
        LogLevel::Info => SyslogPriority::Info,
        LogLevel::Debug => SyslogPriority::Debug,
    }
}

// openlog(3) keeps the ident pointer, so the string must outlive the
// connection that uses it. `generation` counts opens so that only the guard of
// the latest open closes the connection.
struct Connection {
    ident: Option<CString>,
    generation: u64,
}

static CONNECTION: Mutex<Connection> = Mutex::new(Connection {
    ident: None,
    generation: 0,
});

fn connection() -> MutexGuard<'static, Connection> {
    CONNECTION
        .lock()
        .unwrap_or_else(|poison| poison.into_inner())
}

/// Tag and facility passed to openlog(3).
///
/// Constructing a [`SyslogConfig`] does not open anything; call
/// [`open`](SyslogConfig::open) to start using it.
///
/// # Examples
///
/// ```
/// use logging_sink::syslog::{SyslogConfig, SyslogFacility};
///
/// let config = SyslogConfig::new(SyslogFacility::Local5).with_tag("replicator");
/// assert_eq!(config.facility(), SyslogFacility::Local5);
/// assert_eq!(config.tag(), Some("replicator"));
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SyslogConfig {
    facility: SyslogFacility,
    tag: Option<String>,
}

impl SyslogConfig {
    /// Creates a configuration for `facility` tagged with the program name.
    pub const fn new(facility: SyslogFacility) -> Self {
        Self {
            facility,
            tag: None,
        }
    }

    /// Replaces the tag prepended to every message.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Returns the configured facility.
    pub const fn facility(&self) -> SyslogFacility {
        self.facility
    }

    /// Returns the configured tag, or `None` for the program name.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Opens the syslog connection with `LOG_PID` set.
    ///
    /// A tag containing a NUL byte falls back to the program name. Opening
    /// again replaces the previous tag and facility for the whole process and
    /// supersedes any guard still alive from an earlier open.
    pub fn open(&self) -> SyslogGuard {
        let ident = self.tag.as_deref().and_then(|tag| CString::new(tag).ok());
        let mut connection = connection();
        let ident_ptr = ident.as_ref().map_or(ptr::null(), |ident| ident.as_ptr());

        // SAFETY: `ident_ptr` is null or points into `ident`'s heap buffer,
        // which is moved into the static connection below and stays alive
        // until the next open.
        unsafe {
            libc::openlog(ident_ptr, libc::LOG_PID, self.facility as libc::c_int);
        }
        connection.ident = ident;
        connection.generation = connection.generation.wrapping_add(1);

        SyslogGuard {
            generation: connection.generation,
        }
    }
}

/// Closes the syslog connection when dropped.
///
/// Only the guard from the most recent [`SyslogConfig::open`] closes the
/// connection; dropping a superseded guard does nothing. Messages written
/// after the connection is closed reopen it with the default tag and
/// facility.
#[derive(Debug)]
#[must_use = "dropping the guard closes the syslog connection"]
pub struct SyslogGuard {
    generation: u64,
}

impl SyslogGuard {
    /// Returns `true` if no later open has superseded this guard.
    pub fn is_current(&self) -> bool {
        connection().generation == self.generation
    }
}

impl Drop for SyslogGuard {
    fn drop(&mut self) {
        let connection = connection();
        if connection.generation != self.generation {
            return;
        }
        // The ident stays in place; syslog(3) may still reference it.
        // SAFETY: closelog has no preconditions.
        unsafe {
            libc::closelog();
        }
    }
}

/// Logger that calls syslog(3).
///
/// The message bytes are passed through a `%.*s` format, so they are emitted
/// verbatim up to `size` bytes or the first NUL, whichever comes first.
#[derive(Clone, Copy, Debug, Default)]
pub struct SysLogger {
    _private: (),
}

impl SysLogger {
    /// Creates the logger.
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl Logger for SysLogger {
    fn write_log(&self, level: LogLevel, msg: LogMsg, size: usize) {
        let bytes = msg.bytes(size);
        let len = libc::c_int::try_from(bytes.len()).unwrap_or(libc::c_int::MAX);
        // SAFETY: the format is a static C string and `bytes` is valid for
        // `len` bytes; `%.*s` reads no further than the precision.
        unsafe {
            libc::syslog(
                priority_for(level) as libc::c_int,
                c"%.*s".as_ptr(),
                len,
                bytes.as_ptr().cast::<libc::c_char>(),
            );
        }
    }
}

static SYS_LOGGER: LazyLock<Arc<dyn Logger>> = LazyLock::new(|| Arc::new(SysLogger::new()));

/// Returns the shared system logger.
pub fn sys_logger() -> Arc<dyn Logger> {
    Arc::clone(&SYS_LOGGER)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Opens share one process-wide connection.
    fn lock_connection_tests() -> MutexGuard<'static, ()> {
        static LOCK: Mutex<()> = Mutex::new(());
        LOCK.lock().unwrap_or_else(|poison| poison.into_inner())
    }

    #[test]
    fn default_facility_is_user() {
        assert_eq!(SyslogFacility::default(), SyslogFacility::User);
        assert_eq!(SyslogConfig::default().facility(), SyslogFacility::User);
        assert_eq!(SyslogConfig::default().tag(), None);
    }

    #[test]
    fn from_name_round_trips_every_facility() {
        for facility in SyslogFacility::ALL {
            assert_eq!(
                SyslogFacility::from_name(facility.as_str()),
                Some(facility),
                "round-trip failed for {facility:?}"
            );
        }
    }

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(
            SyslogFacility::from_name("DAEMON"),
            Some(SyslogFacility::Daemon)
        );
        assert_eq!(
            SyslogFacility::from_name("Local0"),
            Some(SyslogFacility::Local0)
        );
    }

    #[test]
    fn from_name_rejects_unknown() {
        assert_eq!(SyslogFacility::from_name(""), None);
        assert_eq!(SyslogFacility::from_name("local8"), None);
        assert_eq!(SyslogFacility::from_name("LOG_DAEMON"), None);
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(SyslogFacility::Local3.to_string(), "local3");
    }

    #[test]
    fn facility_values_match_libc_constants() {
        assert_eq!(SyslogFacility::Kern as i32, libc::LOG_KERN);
        assert_eq!(SyslogFacility::User as i32, libc::LOG_USER);
        assert_eq!(SyslogFacility::Daemon as i32, libc::LOG_DAEMON);
        assert_eq!(SyslogFacility::Local7 as i32, libc::LOG_LOCAL7);
    }

    #[test]
    fn priority_for_maps_each_level() {
        let expected = [
            libc::LOG_CRIT,
            libc::LOG_ERR,
            libc::LOG_WARNING,
            libc::LOG_NOTICE,
            libc::LOG_INFO,
            libc::LOG_DEBUG,
        ];
        for (level, priority) in LogLevel::ALL.into_iter().zip(expected) {
            assert_eq!(priority_for(level) as i32, priority, "{level:?}");
        }
    }

    #[test]
    fn priority_for_preserves_order() {
        let priorities: Vec<i32> = LogLevel::ALL
            .into_iter()
            .map(|level| priority_for(level) as i32)
            .collect();
        assert!(priorities.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn with_tag_stores_tag() {
        let config = SyslogConfig::new(SyslogFacility::Auth).with_tag(String::from("auditor"));
        assert_eq!(config.tag(), Some("auditor"));
        assert_eq!(config.facility(), SyslogFacility::Auth);
    }

    #[test]
    fn open_and_close_with_tags() {
        let _lock = lock_connection_tests();
        let _guard = SyslogConfig::new(SyslogFacility::Local7)
            .with_tag("logging-sink-tests")
            .open();
        let _reopened = SyslogConfig::default().with_tag("bad\0tag").open();
    }

    #[test]
    fn sys_logger_writes_without_panicking() {
        let _lock = lock_connection_tests();
        let _guard = SyslogConfig::default().with_tag("logging-sink-tests").open();
        let logger = sys_logger();
        logger.write_log(LogLevel::Debug, LogMsg::from_bytes(b"100% %s %n"), 10);
        logger.write_log(LogLevel::Info, LogMsg::new(), 0);
        logger.write_log(LogLevel::Notice, LogMsg::from_bytes(b"with\0nul"), 8);
    }

    #[test]
    fn later_open_supersedes_earlier_guard() {
        let _lock = lock_connection_tests();
        let first = SyslogConfig::new(SyslogFacility::Local1)
            .with_tag("logging-sink-first")
            .open();
        assert!(first.is_current());

        let second = SyslogConfig::new(SyslogFacility::Local2)
            .with_tag("logging-sink-second")
            .open();
        assert!(!first.is_current());
        assert!(second.is_current());

        let generation = connection().generation;
        drop(first);
        assert!(second.is_current());
        assert_eq!(connection().generation, generation);
        assert_eq!(connection().ident.as_deref(), Some(c"logging-sink-second"));
    }

    #[test]
    fn sys_logger_is_shared() {
        assert!(Arc::ptr_eq(&sys_logger(), &sys_logger()));
    }
}
