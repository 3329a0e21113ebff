//! crates/logging/src/level.rs
//! Severity levels and their display labels.

use std::fmt;
use std::str::FromStr;

/// Severity of a log message, ordered from most to least severe.
///
/// The derived ordering follows declaration order, so `Crit < Error < ... < Debug`.
/// A lower value is more severe; filtering and sink routing both rely on this.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum LogLevel {
    /// Critical.
    Crit = 0,
    /// Error.
    Error = 1,
    /// Warning.
    Warning = 2,
    /// Notice.
    Notice = 3,
    /// Information.
    Info = 4,
    /// Debug.
    Debug = 5,
}

impl LogLevel {
    /// Every level, most severe first.
    pub const ALL: [Self; 6] = [
        Self::Crit,
        Self::Error,
        Self::Warning,
        Self::Notice,
        Self::Info,
        Self::Debug,
    ];

    /// Returns the fixed display label for this level.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::LogLevel;
    ///
    /// assert_eq!(LogLevel::Crit.label(), "CRIT");
    /// assert_eq!(LogLevel::Warning.label(), "WARNING");
    /// ```
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Crit => "CRIT",
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Notice => "NOTICE",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        }
    }

    /// Converts a raw ordinal back into a level.
    ///
    /// Values past [`LogLevel::Debug`] saturate to `Debug`.
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Crit,
            1 => Self::Error,
            2 => Self::Warning,
            3 => Self::Notice,
            4 => Self::Info,
            _ => Self::Debug,
        }
    }

    /// Returns `true` if `self` is at least as severe as `threshold`.
    ///
    /// This is the pure form of [`is_log_level`](crate::is_log_level), which
    /// compares against the process-wide threshold instead.
    ///
    /// ```
    /// use logging::LogLevel;
    ///
    /// assert!(LogLevel::Error.is_at_least(LogLevel::Warning));
    /// assert!(LogLevel::Warning.is_at_least(LogLevel::Warning));
    /// assert!(!LogLevel::Info.is_at_least(LogLevel::Warning));
    /// ```
    #[inline(always)]
    #[must_use]
    pub const fn is_at_least(self, threshold: Self) -> bool {
        self as u8 <= threshold as u8
    }
}

/// Returns the log label for the given level.
#[must_use]
pub const fn log_label(level: LogLevel) -> &'static str {
    level.label()
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Error returned when a string does not name a [`LogLevel`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level '{input}' (expected crit, error, warning, notice, info or debug)")]
pub struct ParseLogLevelError {
    input: String,
}

impl ParseLogLevelError {
    /// Returns the rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    /// Parses a level name case-insensitively.
    ///
    /// Accepts the labels themselves, the common aliases `critical`, `err` and
    /// `warn`, and the ordinals `0` through `5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "crit" | "critical" | "0" => Ok(Self::Crit),
            "error" | "err" | "1" => Ok(Self::Error),
            "warning" | "warn" | "2" => Ok(Self::Warning),
            "notice" | "3" => Ok(Self::Notice),
            "info" | "4" => Ok(Self::Info),
            "debug" | "5" => Ok(Self::Debug),
            _ => Err(ParseLogLevelError {
                input: s.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_runs_from_most_to_least_severe() {
        for pair in LogLevel::ALL.windows(2) {
            assert!(
                pair[0] < pair[1],
                "{:?} should sort before {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn labels_are_fixed() {
        let labels: Vec<_> = LogLevel::ALL.iter().map(|level| level.label()).collect();
        assert_eq!(
            labels,
            ["CRIT", "ERROR", "WARNING", "NOTICE", "INFO", "DEBUG"]
        );
        assert_eq!(log_label(LogLevel::Notice), "NOTICE");
    }

    #[test]
    fn display_honours_padding() {
        assert_eq!(format!("{}", LogLevel::Info), "INFO");
        assert_eq!(format!("{:<7}|", LogLevel::Info), "INFO   |");
        assert_eq!(format!("{:<7}|", LogLevel::Warning), "WARNING|");
    }

    #[test]
    fn from_u8_inverts_discriminant() {
        for level in LogLevel::ALL {
            assert_eq!(LogLevel::from_u8(level as u8), level);
        }
    }

    #[test]
    fn from_u8_saturates_to_debug() {
        assert_eq!(LogLevel::from_u8(6), LogLevel::Debug);
        assert_eq!(LogLevel::from_u8(u8::MAX), LogLevel::Debug);
    }

    #[test]
    fn is_at_least_matches_ordering() {
        for level in LogLevel::ALL {
            for threshold in LogLevel::ALL {
                assert_eq!(level.is_at_least(threshold), level <= threshold);
            }
        }
    }

    #[test]
    fn parse_accepts_labels_and_aliases() {
        assert_eq!("CRIT".parse::<LogLevel>(), Ok(LogLevel::Crit));
        assert_eq!("critical".parse::<LogLevel>(), Ok(LogLevel::Crit));
        assert_eq!("Err".parse::<LogLevel>(), Ok(LogLevel::Error));
        assert_eq!("warn".parse::<LogLevel>(), Ok(LogLevel::Warning));
        assert_eq!(" notice ".parse::<LogLevel>(), Ok(LogLevel::Notice));
        assert_eq!("5".parse::<LogLevel>(), Ok(LogLevel::Debug));
    }

    #[test]
    fn parse_rejects_unknown_names() {
        let err = "verbose".parse::<LogLevel>().unwrap_err();
        assert_eq!(err.input(), "verbose");
        assert!(err.to_string().contains("verbose"));
        assert!("6".parse::<LogLevel>().is_err());
        assert!("".parse::<LogLevel>().is_err());
    }
}
