//! Local cache of the backend state.
//!
//! DESIGN
//! ======
//! `motion_enabled` and `show_active` are caches, not truth. Commands may
//! flip them optimistically after an acknowledgment; every status poll
//! overwrites them with what the server reports.
//!
//! Polls are stamped with a sequence number when issued. A response is
//! applied only if it is newer than the last applied one of the same kind,
//! so a slow poll never rolls back a faster, later poll. Optimistic updates
//! are not sequenced and can still be overwritten by a poll issued before
//! the command; the following poll settles it.

use time::OffsetDateTime;

use crate::api::types::{DEFAULT_SHOW_DURATION, StatsBody, StatusBody};

// =============================================================================
// SYSTEM STATUS
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemStatus {
    pub initialized: bool,
    pub motion_enabled: bool,
    pub show_active: bool,
}

impl From<StatusBody> for SystemStatus {
    fn from(body: StatusBody) -> Self {
        Self {
            initialized: body.scarepi_initialized,
            motion_enabled: body.motion_enabled,
            show_active: body.show_active,
        }
    }
}

// =============================================================================
// AUDIENCE STATS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudienceStats {
    pub total_audience: u64,
    pub youtube_subscribers: u64,
    pub total_scares: u64,
    /// `H:MM:SS` as reported by the backend.
    pub show_duration: String,
}

impl Default for AudienceStats {
    fn default() -> Self {
        Self {
            total_audience: 0,
            youtube_subscribers: 0,
            total_scares: 0,
            show_duration: DEFAULT_SHOW_DURATION.to_owned(),
        }
    }
}

impl From<StatsBody> for AudienceStats {
    fn from(body: StatsBody) -> Self {
        let show_duration = if body.show_duration.trim().is_empty() {
            DEFAULT_SHOW_DURATION.to_owned()
        } else {
            body.show_duration
        };
        Self {
            total_audience: body.total_audience,
            youtube_subscribers: body.youtube_subscribers,
            total_scares: body.total_scares,
            show_duration,
        }
    }
}

// =============================================================================
// CONTROLLER STATE
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerState {
    pub status: SystemStatus,
    pub stats: AudienceStats,
    /// At least one status poll has succeeded.
    pub synced: bool,
    /// The newest resolved status poll failed.
    pub status_error: bool,
    /// The newest resolved stats poll failed.
    pub stats_error: bool,
    /// Wall-clock time of the last applied status poll.
    pub last_update: Option<OffsetDateTime>,
    status_seq: u64,
    stats_seq: u64,
}

impl ControllerState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a successful status poll. Returns `false` if the response was stale.
    pub fn apply_status(&mut self, seq: u64, status: SystemStatus, at: OffsetDateTime) -> bool {
        if seq <= self.status_seq {
            return false;
        }
        self.status_seq = seq;
        self.status = status;
        self.synced = true;
        self.status_error = false;
        self.last_update = Some(at);
        true
    }

    /// Record a failed status poll. The cached status is left untouched.
    pub fn mark_status_error(&mut self, seq: u64) -> bool {
        if seq <= self.status_seq {
            return false;
        }
        self.status_seq = seq;
        self.status_error = true;
        true
    }

    /// Replace the stats wholesale. Returns `false` if the response was stale.
    pub fn apply_stats(&mut self, seq: u64, stats: AudienceStats) -> bool {
        if seq <= self.stats_seq {
            return false;
        }
        self.stats_seq = seq;
        self.stats = stats;
        self.stats_error = false;
        true
    }

    pub fn mark_stats_error(&mut self, seq: u64) -> bool {
        if seq <= self.stats_seq {
            return false;
        }
        self.stats_seq = seq;
        self.stats_error = true;
        true
    }

    /// Optimistic flip after `/api/motion/toggle` succeeded. Returns the new value.
    pub fn flip_motion(&mut self) -> bool {
        self.status.motion_enabled = !self.status.motion_enabled;
        self.status.motion_enabled
    }

    /// Optimistic update after a show start/stop succeeded.
    pub fn set_show_active(&mut self, active: bool) {
        self.status.show_active = active;
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
