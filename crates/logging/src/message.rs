//! crates/logging/src/message.rs
//! Fixed-capacity owning buffer for one formatted log line.

use std::fmt;

/// Maximum number of bytes in a single log line.
pub const MAX_LOG_LINE: usize = 512;

/// Owning handle to a formatted log line.
///
/// The buffer has a fixed capacity of [`MAX_LOG_LINE`] bytes and a logical
/// length. A `LogMsg` is never cloned: it is built by the caller, moved into
/// [`write_log`](crate::write_log), and released by whichever logger ends up
/// holding it. Writes beyond the capacity are truncated silently.
///
/// # Examples
///
/// ```
/// use std::fmt::Write as _;
/// use logging::LogMsg;
///
/// let mut msg = LogMsg::new();
/// write!(msg, "transferred {} bytes", 42).unwrap();
/// assert_eq!(msg.as_bytes(), b"transferred 42 bytes");
/// assert!(!msg.is_truncated());
/// ```
pub struct LogMsg {
    buf: Box<[u8; MAX_LOG_LINE]>,
    len: usize,
    truncated: bool,
}

impl LogMsg {
    /// Allocates an empty message buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Box::new([0; MAX_LOG_LINE]),
            len: 0,
            truncated: false,
        }
    }

    /// Allocates a buffer holding a copy of `bytes`, truncated to capacity.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut msg = Self::new();
        msg.push_bytes(bytes);
        msg
    }

    /// Number of bytes written so far.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Fixed capacity of every message buffer.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        MAX_LOG_LINE
    }

    /// Returns `true` if a write was cut short because the buffer was full.
    #[must_use]
    pub const fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// The written portion of the buffer.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// The first `size` bytes of the message, clamped to its length.
    ///
    /// Loggers use this to honour the `size` argument of
    /// [`Logger::write_log`](crate::Logger::write_log). Bytes past the written
    /// length are never returned, so a reused buffer cannot leak an earlier
    /// message.
    #[must_use]
    pub fn bytes(&self, size: usize) -> &[u8] {
        &self.buf[..size.min(self.len)]
    }

    /// Appends as much of `bytes` as fits and returns the number copied.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> usize {
        let room = MAX_LOG_LINE - self.len;
        let n = bytes.len().min(room);
        self.buf[self.len..self.len + n].copy_from_slice(&bytes[..n]);
        self.len += n;
        if n < bytes.len() {
            self.truncated = true;
        }
        n
    }

    /// Resets the logical length so the buffer can be reused.
    pub fn clear(&mut self) {
        self.len = 0;
        self.truncated = false;
    }
}

impl Default for LogMsg {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Write for LogMsg {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        // Overflow truncates; formatting never fails.
        self.push_bytes(s.as_bytes());
        Ok(())
    }
}

impl fmt::Debug for LogMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogMsg")
            .field("text", &String::from_utf8_lossy(self.as_bytes()))
            .field("len", &self.len)
            .field("truncated", &self.truncated)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;

    #[test]
    fn new_message_is_empty() {
        let msg = LogMsg::new();
        assert!(msg.is_empty());
        assert_eq!(msg.len(), 0);
        assert_eq!(msg.capacity(), MAX_LOG_LINE);
        assert!(msg.as_bytes().is_empty());
    }

    #[test]
    fn write_appends_formatted_text() {
        let mut msg = LogMsg::new();
        write!(msg, "a={} ", 1).unwrap();
        write!(msg, "b={}", "two").unwrap();
        assert_eq!(msg.as_bytes(), b"a=1 b=two");
        assert_eq!(msg.len(), 9);
    }

    #[test]
    fn overflow_truncates_at_capacity() {
        let mut msg = LogMsg::new();
        let long = "x".repeat(MAX_LOG_LINE + 100);
        write!(msg, "{long}").unwrap();
        assert_eq!(msg.len(), MAX_LOG_LINE);
        assert!(msg.is_truncated());

        // Further writes are dropped rather than failing.
        assert!(write!(msg, "more").is_ok());
        assert_eq!(msg.len(), MAX_LOG_LINE);
    }

    #[test]
    fn push_bytes_reports_copied_count() {
        let mut msg = LogMsg::from_bytes(&[b'a'; MAX_LOG_LINE - 2]);
        assert_eq!(msg.push_bytes(b"bcd"), 2);
        assert!(msg.is_truncated());
        assert!(msg.as_bytes().ends_with(b"bc"));
    }

    #[test]
    fn bytes_clamps_to_written_length() {
        let msg = LogMsg::from_bytes(b"hello");
        assert_eq!(msg.bytes(3), b"hel");
        assert_eq!(msg.bytes(MAX_LOG_LINE * 2), b"hello");

        let full = LogMsg::from_bytes(&[b'f'; MAX_LOG_LINE + 1]);
        assert_eq!(full.bytes(MAX_LOG_LINE * 2).len(), MAX_LOG_LINE);
    }

    #[test]
    fn cleared_buffer_does_not_expose_previous_message() {
        let mut msg = LogMsg::from_bytes(b"secret-token");
        msg.clear();
        msg.push_bytes(b"ok");
        assert_eq!(msg.bytes(12), b"ok");
        assert_eq!(msg.as_bytes(), b"ok");
    }

    #[test]
    fn clear_resets_length_and_truncation() {
        let mut msg = LogMsg::from_bytes(&[0; MAX_LOG_LINE + 1]);
        assert!(msg.is_truncated());
        msg.clear();
        assert!(msg.is_empty());
        assert!(!msg.is_truncated());
    }

    #[test]
    fn debug_shows_text() {
        let msg = LogMsg::from_bytes(b"ready");
        let debug = format!("{msg:?}");
        assert!(debug.contains("LogMsg"));
        assert!(debug.contains("ready"));
    }
}
