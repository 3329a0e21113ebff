#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` is the process-wide logging facility shared across the
//! workspace: a pluggable [`Logger`] sink, a global severity threshold, and
//! [`ScopedLogger`] for temporarily redirecting output.
//!
//! # Design
//!
//! The facility holds exactly two pieces of global state, both readable from
//! any thread without locking:
//!
//! - the active logger, read with [`get_logger`] and replaced with
//!   [`set_logger`] (defaults to [`std_logger`]);
//! - the log level, read with [`get_log_level`] and replaced with
//!   [`set_log_level`] (defaults to [`LogLevel::Info`]).
//!
//! Emitting a message is three steps: test [`is_log_level`], format into a
//! [`LogMsg`], and hand the message to [`write_log`]. `write_log` never
//! filters, so the check must come first; the `log_*!` macros do all three.
//!
//! # Invariants
//!
//! - [`LogLevel`] ordering runs from [`LogLevel::Crit`] (most severe) to
//!   [`LogLevel::Debug`]; a level is enabled when it sorts at or before the
//!   threshold.
//! - A [`LogMsg`] has a single owner. It is moved into the logger, which drops
//!   it after writing.
//! - [`Logger::write_log`] is infallible. Sinks swallow their own I/O errors.
//! - Global state is never destroyed; logging during process exit reaches the
//!   last installed logger.
//!
//! # Examples
//!
//! Capture output in memory for the duration of a scope:
//!
//! ```
//! use std::sync::Arc;
//! use logging::{
//!     Header, LogLevel, Logger, ScopedLogger, StreamLogger, log_error, log_info, set_log_level,
//! };
//!
//! let capture = Arc::new(StreamLogger::new(Vec::new(), Vec::new()).with_header(Header::Label));
//! let previous_level = set_log_level(LogLevel::Warning);
//! {
//!     let _scoped = ScopedLogger::new(Arc::clone(&capture) as Arc<dyn Logger>);
//!     log_info!("suppressed");
//!     log_error!("exit code {}", 23);
//! }
//! set_log_level(previous_level);
//!
//! let (out, err) = capture.with_streams(|out, err| (out.clone(), err.clone()));
//! assert!(out.is_empty());
//! assert_eq!(err, b"ERROR   exit code 23\n");
//! ```
//!
//! # See also
//!
//! - `logging-sink` for the syslog(3) logger.
//! - `LoggerLayer` (feature `tracing`) to route `tracing` events here.

mod config;
mod level;
mod line_mode;
mod logger;
mod macros;
mod message;
mod scoped;
mod state;
mod stream;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::{ConfigError, LOG_LEVEL_ENV, LogConfig, LogTarget};
pub use level::{LogLevel, ParseLogLevelError, log_label};
pub use line_mode::LineMode;
pub use logger::{IntoLogger, Logger, NullLogger, null_logger};
pub use message::{LogMsg, MAX_LOG_LINE};
pub use scoped::ScopedLogger;
pub use state::{
    DEFAULT_LOG_LEVEL, get_log_level, get_logger, is_log_level, set_log_level, set_logger,
    write_log, write_log_fmt,
};
pub use stream::{
    ERROR_STREAM_LEVEL, Header, StdLogger, StreamLogger, routes_to_error_stream, std_logger,
};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{LoggerLayer, init_tracing};
