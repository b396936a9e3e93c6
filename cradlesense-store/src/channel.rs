//! Telemetry channels
//!
//! A channel is a per-category log. All channels are append-only; the
//! consent flag is not a channel and lives on its own overwrite path in
//! the store.

/// Append-only telemetry channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Gesture classification results
    Gestures,
    /// Mood readings (stored under the historical `emotions` path)
    Moods,
    /// Temperature readings
    Health,
    /// Task assignments
    Tasks,
    /// Community calendar events (device-shared, not per-user)
    CommunityEvents,
}

impl Channel {
    /// Get channel name as used in storage paths
    pub const fn name(&self) -> &'static str {
        match self {
            Channel::Gestures => "gestures",
            Channel::Moods => "emotions",
            Channel::Health => "health",
            Channel::Tasks => "tasks",
            Channel::CommunityEvents => "events",
        }
    }

    /// Storage path for this channel and user
    ///
    /// Community events are shared across users of one device; every other
    /// channel is scoped under the user.
    pub fn path_for(&self, user: &str) -> String {
        match self {
            Channel::CommunityEvents => "community/events".to_string(),
            _ => format!("users/{user}/{}", self.name()),
        }
    }
}
