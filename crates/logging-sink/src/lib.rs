#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` provides the system logger for the process-wide logging
//! facility in the `logging` crate. [`SysLogger`](syslog::SysLogger) forwards
//! every message to syslog(3), mapping each
//! [`LogLevel`](logging::LogLevel) onto the matching syslog priority.
//!
//! # Design
//!
//! The crate talks to libc `openlog`/`syslog`/`closelog` directly. Opening a
//! connection is optional: syslog(3) connects lazily on the first message
//! using the program name and the `LOG_USER` facility. Call
//! [`SyslogConfig::open`](syslog::SyslogConfig::open) to choose a different
//! tag or facility; the returned guard closes the connection when dropped.
//!
//! # Invariants
//!
//! - Messages are passed as an argument to a fixed `%.*s` format, so `%` in a
//!   message is never interpreted and exactly `size` bytes are sent.
//! - [`SysLogger`](syslog::SysLogger) never reports failure to its caller.
//!
//! # Examples
//!
//! ```no_run
//! # #[cfg(unix)]
//! # {
//! use logging::{LogLevel, log_notice, set_log_level, set_logger};
//! use logging_sink::syslog::{SyslogConfig, SyslogFacility, sys_logger};
//!
//! let _syslog = SyslogConfig::new(SyslogFacility::Daemon)
//!     .with_tag("gatewayd")
//!     .open();
//! set_logger(sys_logger());
//! set_log_level(LogLevel::Notice);
//!
//! log_notice!("accepting connections on port {}", 9000);
//! # }
//! ```
//!
//! # See also
//!
//! - `logging` for the logger trait, the standard-stream logger and the
//!   process-wide state.

#[cfg(unix)]
pub mod syslog;
