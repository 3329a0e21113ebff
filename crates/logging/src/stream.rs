//! crates/logging/src/stream.rs
//! Console-style logger that splits output between two streams by severity.

use std::fmt;
use std::io::{self, Stderr, Stdout, Write};
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, OnceLock};

use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use crate::level::LogLevel;
use crate::line_mode::LineMode;
use crate::logger::Logger;
use crate::message::LogMsg;

/// Least severe level that is still routed to the error stream.
pub const ERROR_STREAM_LEVEL: LogLevel = LogLevel::Warning;

/// Returns `true` if `level` is written to the error stream.
///
/// Warnings and anything more severe go to the error stream; notices and
/// below go to the output stream.
#[must_use]
pub const fn routes_to_error_stream(level: LogLevel) -> bool {
    level.is_at_least(ERROR_STREAM_LEVEL)
}

/// Prefix written before each message by a [`StreamLogger`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Header {
    /// Local time, padded label and thread id: `"Mar 04 13:05:09.042 WARNING [1234]: "`.
    #[default]
    Full,
    /// The bare padded label: `"WARNING "`.
    Label,
}

struct Streams<O, E> {
    out: O,
    err: E,
}

/// Logger writing to an output stream and an error stream.
///
/// Messages at [`ERROR_STREAM_LEVEL`] or more severe are written to the error
/// stream, the rest to the output stream. Each line is assembled in full and
/// written with a single `write_all` while holding the logger's lock, so
/// concurrent callers never interleave within a line. Write failures are
/// discarded.
///
/// # Examples
///
/// ```
/// use logging::{Header, LogLevel, LogMsg, Logger, StreamLogger};
///
/// let logger = StreamLogger::new(Vec::new(), Vec::new()).with_header(Header::Label);
/// logger.write_log(LogLevel::Error, LogMsg::from_bytes(b"disk full"), 9);
/// logger.write_log(LogLevel::Info, LogMsg::from_bytes(b"started"), 7);
///
/// let (out, err) = logger.into_inner();
/// assert_eq!(out, b"INFO    started\n");
/// assert_eq!(err, b"ERROR   disk full\n");
/// ```
pub struct StreamLogger<O, E> {
    streams: Mutex<Streams<O, E>>,
    header: Header,
    line_mode: LineMode,
}

/// Logger bound to the process's standard output and standard error.
pub type StdLogger = StreamLogger<Stdout, Stderr>;

impl<O, E> StreamLogger<O, E> {
    /// Creates a logger with the full header and newline-terminated lines.
    #[must_use]
    pub fn new(out: O, err: E) -> Self {
        Self {
            streams: Mutex::new(Streams { out, err }),
            header: Header::Full,
            line_mode: LineMode::WithNewline,
        }
    }

    /// Selects the header written before each message.
    #[must_use]
    pub fn with_header(mut self, header: Header) -> Self {
        self.header = header;
        self
    }

    /// Selects whether lines are newline-terminated.
    #[must_use]
    pub fn with_line_mode(mut self, line_mode: LineMode) -> Self {
        self.line_mode = line_mode;
        self
    }

    /// Returns the configured header.
    #[must_use]
    pub const fn header(&self) -> Header {
        self.header
    }

    /// Returns the configured [`LineMode`].
    #[must_use]
    pub const fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Runs `f` with exclusive access to the output and error streams.
    pub fn with_streams<R>(&self, f: impl FnOnce(&mut O, &mut E) -> R) -> R {
        let mut streams = self.lock();
        let Streams { out, err } = &mut *streams;
        f(out, err)
    }

    /// Consumes the logger and returns the `(output, error)` streams.
    #[must_use]
    pub fn into_inner(self) -> (O, E) {
        let Streams { out, err } = self
            .streams
            .into_inner()
            .unwrap_or_else(|poison| poison.into_inner());
        (out, err)
    }

    fn lock(&self) -> MutexGuard<'_, Streams<O, E>> {
        self.streams
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    fn render(&self, level: LogLevel, body: &[u8]) -> Vec<u8> {
        let mut line = Vec::with_capacity(HEADER_CAPACITY + body.len() + 1);
        match self.header {
            Header::Full => {
                let _ = write!(
                    line,
                    "{} {:<7} [{}]: ",
                    timestamp(),
                    level.label(),
                    thread_id()
                );
            }
            Header::Label => {
                let _ = write!(line, "{:<7} ", level.label());
            }
        }
        line.extend_from_slice(body);
        if self.line_mode.append_newline() {
            line.push(b'\n');
        }
        line
    }
}

impl StdLogger {
    /// Creates a logger writing to standard output and standard error.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O, E> Logger for StreamLogger<O, E>
where
    O: Write + Send,
    E: Write + Send,
{
    fn write_log(&self, level: LogLevel, msg: LogMsg, size: usize) {
        let line = self.render(level, msg.bytes(size));
        drop(msg);

        let mut streams = self.lock();
        let Streams { out, err } = &mut *streams;
        let stream: &mut dyn Write = if routes_to_error_stream(level) {
            err
        } else {
            out
        };
        let _ = stream.write_all(&line);
        let _ = stream.flush();
    }
}

impl<O, E> fmt::Debug for StreamLogger<O, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamLogger")
            .field("header", &self.header)
            .field("line_mode", &self.line_mode)
            .finish_non_exhaustive()
    }
}

static STD_LOGGER: LazyLock<Arc<dyn Logger>> = LazyLock::new(|| Arc::new(StdLogger::stdio()));

/// Returns the shared standard-stream logger, the default active logger.
#[must_use]
pub fn std_logger() -> Arc<dyn Logger> {
    Arc::clone(&STD_LOGGER)
}

// "Mon DD HH:MM:SS.mmm LABEL__ [tid]: " stays well under this.
const HEADER_CAPACITY: usize = 48;

fn timestamp() -> String {
    let now = OffsetDateTime::now_utc().to_offset(local_offset());
    now.format(format_description!(
        "[month repr:short] [day] [hour]:[minute]:[second].[subsecond digits:3]"
    ))
    .unwrap_or_default()
}

// Resolved once; `current_local_offset` refuses to answer on some platforms
// once the process is multi-threaded.
fn local_offset() -> UtcOffset {
    static OFFSET: OnceLock<UtcOffset> = OnceLock::new();
    *OFFSET.get_or_init(|| UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
}

#[cfg(target_os = "linux")]
#[allow(unsafe_code)]
fn thread_id() -> i64 {
    // SAFETY: gettid(2) takes no arguments and always succeeds.
    i64::from(unsafe { libc::gettid() })
}

#[cfg(not(target_os = "linux"))]
fn thread_id() -> i64 {
    i64::from(std::process::id())
}
