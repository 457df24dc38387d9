//! Status bar messages for the form.

use std::time::{Duration, Instant};

/// Severity of a status message, used to pick its style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLevel {
    #[default]
    Info,
    Warning,
    Error,
}

/// Manages temporary status messages with optional auto-clear.
///
/// Errors never auto-clear: a failed model load stays visible for the whole
/// session.
#[derive(Debug, Clone, Default)]
pub struct StatusMessage {
    message: Option<String>,
    level: StatusLevel,
    set_at: Option<Instant>,
    auto_clear_after: Option<Duration>,
}

impl StatusMessage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a status message manager with auto-clear after duration.
    #[must_use]
    pub const fn with_auto_clear(duration: Duration) -> Self {
        Self {
            message: None,
            level: StatusLevel::Info,
            set_at: None,
            auto_clear_after: Some(duration),
        }
    }

    pub fn set(&mut self, msg: impl Into<String>) {
        self.set_with_level(msg, StatusLevel::Info);
    }

    pub fn warn(&mut self, msg: impl Into<String>) {
        self.set_with_level(msg, StatusLevel::Warning);
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.set_with_level(msg, StatusLevel::Error);
    }

    fn set_with_level(&mut self, msg: impl Into<String>, level: StatusLevel) {
        self.message = Some(msg.into());
        self.level = level;
        self.set_at = Some(Instant::now());
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.set_at = None;
    }

    /// Current message, dropping it first if it has expired.
    pub fn message(&mut self) -> Option<&str> {
        if let (Some(set_at), Some(duration)) = (self.set_at, self.auto_clear_after) {
            if self.level != StatusLevel::Error && set_at.elapsed() >= duration {
                self.clear();
            }
        }
        self.message.as_deref()
    }

    /// Current message without checking auto-clear.
    #[must_use]
    pub fn peek(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub const fn level(&self) -> StatusLevel {
        self.level
    }

    #[must_use]
    pub const fn has_message(&self) -> bool {
        self.message.is_some()
    }
}
