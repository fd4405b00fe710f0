use std::collections::VecDeque;

use chrono::{DateTime, Local};

pub const ACTIVITY_LOG_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEntry {
    pub level: ActivityLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

/// Diagnostic trail of recent actions, newest first and bounded.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: VecDeque<ActivityEntry>,
}

impl ActivityLog {
    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ActivityLevel::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ActivityLevel::Error, message.into());
    }

    fn push(&mut self, level: ActivityLevel, message: String) {
        self.entries.push_front(ActivityEntry {
            level,
            message,
            timestamp: Local::now(),
        });
        self.entries.truncate(ACTIVITY_LOG_LIMIT);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter()
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<&ActivityEntry> {
        self.entries.front()
    }

    pub fn recent(&self, count: usize) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter().take(count)
    }
}
