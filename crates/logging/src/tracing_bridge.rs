//! crates/logging/src/tracing_bridge.rs
//! Bridge from the tracing crate to the process-wide logger.
//!
//! [`LoggerLayer`] is a tracing-subscriber layer that converts each event into
//! a [`LogMsg`] and hands it to [`write_log`], so code instrumented with the
//! standard tracing macros ends up in whichever logger is active, filtered by
//! the same process-wide log level.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{LogLevel, init_tracing, set_log_level};
//!
//! init_tracing();
//! set_log_level(LogLevel::Debug);
//!
//! tracing::warn!(target: "daemon::accept", peer = %addr, "connection refused");
//! ```

use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::level::LogLevel;
use crate::message::LogMsg;
use crate::state::{is_log_level, write_log};

/// A tracing layer that forwards events to the active [`Logger`](crate::Logger).
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggerLayer {
    _private: (),
}

impl LoggerLayer {
    /// Creates the layer.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Maps a tracing level onto a [`LogLevel`].
    ///
    /// Tracing has no critical or notice level; `TRACE` folds into `Debug`.
    #[must_use]
    pub const fn map_level(level: &Level) -> LogLevel {
        match *level {
            Level::ERROR => LogLevel::Error,
            Level::WARN => LogLevel::Warning,
            Level::INFO => LogLevel::Info,
            Level::DEBUG | Level::TRACE => LogLevel::Debug,
        }
    }
}

impl<S> Layer<S> for LoggerLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Self::map_level(metadata.level());
        if !is_log_level(level) {
            return;
        }

        let mut msg = LogMsg::new();
        let _ = write!(msg, "{}: ", metadata.target());
        event.record(&mut MessageVisitor { msg: &mut msg });
        let size = msg.len();
        write_log(level, msg, size);
    }
}

/// Renders the `message` field verbatim and other fields as ` name=value`.
struct MessageVisitor<'a> {
    msg: &'a mut LogMsg,
}

impl Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.msg, "{value:?}");
        } else {
            let _ = write!(self.msg, " {}={value:?}", field.name());
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            let _ = self.msg.write_str(value);
        } else {
            let _ = write!(self.msg, " {}={value}", field.name());
        }
    }
}

/// Installs a global tracing subscriber that forwards to the active logger.
///
/// Panics if a global default subscriber has already been set, like
/// [`SubscriberInitExt::init`](tracing_subscriber::util::SubscriberInitExt::init).
pub fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry().with(LoggerLayer::new()).init();
}
