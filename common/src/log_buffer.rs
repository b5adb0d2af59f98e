//! Levelled log ring for on-screen log viewing.
//!
//! The clock face owns one [`LogBuffer`]; hosts read it back to print or draw
//! the most recent entries. Each entry has a level, a short message, and a
//! monotonically increasing sequence number (the face has no wall clock of
//! its own, so entries are ordered by sequence rather than timestamp).
//!
//! # Log Levels
//!
//! - `Trace`: Dark gray - verbose debugging
//! - `Debug`: Gray - debugging information
//! - `Info`: Green - normal operation
//! - `Warn`: Yellow - warnings
//! - `Error`: Red - errors
//!
//! # Usage
//!
//! ```ignore
//! use klk_common::{log_info, log_warn};
//!
//! log_info!(log, "tick {}:{}", hour, minute);
//! log_warn!(log, "settings discarded: {}", err);
//! ```

use embedded_graphics::pixelcolor::Rgb565;
use heapless::String;

use crate::colors::{GRAY, GREEN, RED, YELLOW};

/// Maximum number of log entries to keep.
pub const LOG_ENTRIES: usize = 16;

/// Maximum characters per log message.
pub const LOG_MSG_LEN: usize = 40;

/// Log severity level.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
#[repr(u8)]
pub enum LogLevel {
    /// Verbose debugging (dark gray)
    Trace = 0,
    /// Debug information (gray)
    Debug = 1,
    /// Normal operation (green)
    #[default]
    Info = 2,
    /// Warnings (yellow)
    Warn = 3,
    /// Errors (red)
    Error = 4,
}

impl LogLevel {
    /// Get the display color for this log level.
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Trace => GRAY,
            Self::Debug => GRAY,
            Self::Info => GREEN,
            Self::Warn => YELLOW,
            Self::Error => RED,
        }
    }

    /// Get the single-character prefix for this level.
    pub const fn prefix(self) -> char {
        match self {
            Self::Trace => 'T',
            Self::Debug => 'D',
            Self::Info => 'I',
            Self::Warn => 'W',
            Self::Error => 'E',
        }
    }
}

/// A single log entry with level, message, and sequence number.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct LogEntry {
    /// Log severity level.
    pub level: LogLevel,
    /// Log message (truncated to LOG_MSG_LEN).
    pub message: String<LOG_MSG_LEN>,
    /// Position in the stream of all entries ever pushed.
    pub seq: u32,
}

impl LogEntry {
    const EMPTY: Self = Self {
        level: LogLevel::Info,
        message: String::new(),
        seq: 0,
    };

    /// Create a new log entry, truncating `message` to fit.
    pub fn new(
        level: LogLevel,
        message: &str,
        seq: u32,
    ) -> Self {
        let mut msg: String<LOG_MSG_LEN> = String::new();
        for c in message.chars() {
            if msg.push(c).is_err() {
                break;
            }
        }
        Self {
            level,
            message: msg,
            seq,
        }
    }
}

/// Circular buffer of log entries.
pub struct LogBuffer {
    entries: [LogEntry; LOG_ENTRIES],
    head: usize, // Next write position
    count: usize,
    next_seq: u32,
    min_level: LogLevel,
}

impl LogBuffer {
    /// Create a new empty log buffer that keeps every level.
    pub const fn new() -> Self { Self::with_min_level(LogLevel::Trace) }

    /// Create a buffer that drops entries below `min_level`.
    pub const fn with_min_level(min_level: LogLevel) -> Self {
        Self {
            entries: [LogEntry::EMPTY; LOG_ENTRIES],
            head: 0,
            count: 0,
            next_seq: 0,
            min_level,
        }
    }

    /// Whether entries at `level` are kept.
    #[inline]
    pub fn enabled(
        &self,
        level: LogLevel,
    ) -> bool {
        level >= self.min_level
    }

    /// Push a message. Oldest entry is dropped if buffer is full.
    pub fn push(
        &mut self,
        level: LogLevel,
        message: &str,
    ) {
        if !self.enabled(level) {
            return;
        }
        self.entries[self.head] = LogEntry::new(level, message, self.next_seq);
        self.next_seq = self.next_seq.wrapping_add(1);
        self.head = (self.head + 1) % LOG_ENTRIES;
        if self.count < LOG_ENTRIES {
            self.count += 1;
        }
    }

    /// Get the number of entries in the buffer.
    #[inline]
    pub const fn len(&self) -> usize { self.count }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool { self.count == 0 }

    /// Sequence number the next entry will get.
    #[inline]
    pub const fn next_seq(&self) -> u32 { self.next_seq }

    /// Most recent entry.
    pub fn last(&self) -> Option<&LogEntry> {
        if self.count == 0 {
            return None;
        }
        Some(&self.entries[(self.head + LOG_ENTRIES - 1) % LOG_ENTRIES])
    }

    /// Drop every entry. Sequence numbers keep counting.
    pub fn clear(&mut self) {
        self.head = 0;
        self.count = 0;
    }

    /// Iterate over entries from oldest to newest.
    pub fn iter(&self) -> LogBufferIter<'_> {
        let start = if self.count < LOG_ENTRIES { 0 } else { self.head };
        LogBufferIter {
            buffer: self,
            pos: start,
            remaining: self.count,
        }
    }
}

impl Default for LogBuffer {
    fn default() -> Self { Self::new() }
}

/// Iterator over log buffer entries (oldest to newest).
pub struct LogBufferIter<'a> {
    buffer: &'a LogBuffer,
    pos: usize,
    remaining: usize,
}

impl<'a> Iterator for LogBufferIter<'a> {
    type Item = &'a LogEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = &self.buffer.entries[self.pos];
        self.pos = (self.pos + 1) % LOG_ENTRIES;
        self.remaining -= 1;
        Some(entry)
    }
}

/// Format and push a log entry at an explicit level.
#[macro_export]
macro_rules! log_at {
    ($log:expr, $level:expr, $($arg:tt)*) => {{
        use core::fmt::Write;
        let mut buf: heapless::String<{ $crate::log_buffer::LOG_MSG_LEN }> = heapless::String::new();
        let _ = write!(buf, $($arg)*);
        $log.push($level, buf.as_str());
    }};
}

/// Log a message at Debug level.
#[macro_export]
macro_rules! log_debug {
    ($log:expr, $($arg:tt)*) => {
        $crate::log_at!($log, $crate::log_buffer::LogLevel::Debug, $($arg)*)
    };
}

/// Log a message at Info level.
#[macro_export]
macro_rules! log_info {
    ($log:expr, $($arg:tt)*) => {
        $crate::log_at!($log, $crate::log_buffer::LogLevel::Info, $($arg)*)
    };
}

/// Log a message at Warn level.
#[macro_export]
macro_rules! log_warn {
    ($log:expr, $($arg:tt)*) => {
        $crate::log_at!($log, $crate::log_buffer::LogLevel::Warn, $($arg)*)
    };
}

/// Log a message at Error level.
#[macro_export]
macro_rules! log_error {
    ($log:expr, $($arg:tt)*) => {
        $crate::log_at!($log, $crate::log_buffer::LogLevel::Error, $($arg)*)
    };
}

// =============================================================================
// Unit Tests
// =============================================================================
