//! Shared test doubles for the logging workspace.
//!
//! The process-wide logger and log level are shared by every test in a
//! binary, and the test harness runs tests in parallel. Tests that touch
//! either slot should open a [`GlobalStateSession`] first: it serialises them
//! and puts the previous logger and level back when dropped.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use logging::{LogLevel, LogMsg, Logger, get_log_level, get_logger, set_log_level, set_logger};
use tempfile::NamedTempFile;

/// One message received by a [`CaptureLogger`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Captured {
    /// Level passed to `write_log`.
    pub level: LogLevel,
    /// The `size` bytes the logger was asked to write.
    pub bytes: Vec<u8>,
}

impl Captured {
    /// The captured bytes as (lossy) UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Logger that records every message in memory.
///
/// Clones share the same record, so a test can install one clone and inspect
/// another.
#[derive(Clone, Debug, Default)]
pub struct CaptureLogger {
    captured: Arc<Mutex<Vec<Captured>>>,
}

impl CaptureLogger {
    /// Creates an empty capture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a clone suitable for [`set_logger`].
    pub fn as_logger(&self) -> Arc<dyn Logger> {
        Arc::new(self.clone())
    }

    /// Number of `write_log` calls received.
    pub fn count(&self) -> usize {
        self.lock().len()
    }

    /// Everything captured so far.
    pub fn captured(&self) -> Vec<Captured> {
        self.lock().clone()
    }

    /// Drains and returns everything captured so far.
    pub fn take(&self) -> Vec<Captured> {
        std::mem::take(&mut *self.lock())
    }

    /// Returns `true` if any captured message contains `text`.
    pub fn contains(&self, text: &str) -> bool {
        self.lock().iter().any(|entry| entry.text().contains(text))
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Captured>> {
        self.captured
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl Logger for CaptureLogger {
    fn write_log(&self, level: LogLevel, msg: LogMsg, size: usize) {
        let bytes = msg.bytes(size).to_vec();
        self.lock().push(Captured { level, bytes });
    }
}

/// Cloneable in-memory writer.
///
/// Hand one clone to a [`StreamLogger`](logging::StreamLogger) and read the
/// output through another.
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the bytes written so far.
    pub fn contents(&self) -> Vec<u8> {
        self.lock().clone()
    }

    /// The bytes written so far as (lossy) UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.bytes
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn global_state_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Exclusive access to the process-wide logger and level for one test.
///
/// Restores the logger and level that were active when the session opened.
#[must_use = "dropping the session releases the global state immediately"]
pub struct GlobalStateSession {
    level: LogLevel,
    logger: Option<Arc<dyn Logger>>,
    _guard: MutexGuard<'static, ()>,
}

impl GlobalStateSession {
    /// Blocks until no other session is open, then records the current state.
    pub fn open() -> Self {
        let guard = global_state_lock()
            .lock()
            .unwrap_or_else(|poison| poison.into_inner());
        Self {
            level: get_log_level(),
            logger: Some(get_logger()),
            _guard: guard,
        }
    }

    /// Opens a session and installs `logger` and `level` for its duration.
    pub fn with(logger: Arc<dyn Logger>, level: LogLevel) -> Self {
        let session = Self::open();
        set_logger(logger);
        set_log_level(level);
        session
    }
}

impl Drop for GlobalStateSession {
    fn drop(&mut self) {
        set_log_level(self.level);
        if let Some(logger) = self.logger.take() {
            set_logger(logger);
        }
    }
}

/// Creates a named temporary file for file-backed logger tests.
pub fn scratch_file() -> NamedTempFile {
    NamedTempFile::new().expect("create scratch file")
}

/// Reads a scratch file back as UTF-8.
pub fn read_scratch(file: &NamedTempFile) -> String {
    std::fs::read_to_string(file.path()).expect("read scratch file")
}
