// Copyright 2025 Cowboy AI, LLC.

//! Non-blocking user-visible notices
//!
//! Recoverable conditions (decomposition gaps, projection failures, rejected
//! loads) surface to the user as notices rather than errors. Notices never
//! block a state transition; the host UI drains and displays them however it
//! likes (toasts in the reference frontend).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How prominently a notice should be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeSeverity {
    /// Informational, e.g. a catalog was loaded
    Info,
    /// Something was recovered from, e.g. a decomposition gap
    Warning,
    /// An operation failed outright, e.g. a rejected catalog load
    Error,
}

/// A single user-visible notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Unique notice id
    pub id: Uuid,
    /// Display severity
    pub severity: NoticeSeverity,
    /// Human-readable message
    pub message: String,
    /// When the notice was raised
    pub timestamp: DateTime<Utc>,
}

impl Notice {
    /// Create a notice with the given severity
    pub fn new(severity: NoticeSeverity, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            severity,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Informational notice
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeSeverity::Info, message)
    }

    /// Warning notice
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeSeverity::Warning, message)
    }

    /// Error notice
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeSeverity::Error, message)
    }
}

/// In-memory accumulator the host UI drains between events
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: Vec<Notice>,
}

impl NoticeLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a notice
    pub fn push(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Notices accumulated since the last drain
    pub fn pending(&self) -> &[Notice] {
        &self.notices
    }

    /// Take all accumulated notices, leaving the log empty
    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
