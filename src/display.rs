//! Display model derived from the cached controller state.
//!
//! Pure functions only; rendering (terminal, web, whatever) is the caller's job.

use std::fmt;

use crate::state::ControllerState;

pub const STATUS_CONNECTING: &str = "Connecting...";
pub const STATUS_ONLINE: &str = "System Online";
pub const STATUS_OFFLINE: &str = "System Offline";

pub const LINK_UNKNOWN: &str = "Unknown";
pub const LINK_CONNECTED: &str = "Connected";
pub const LINK_DISCONNECTED: &str = "Disconnected";
pub const LINK_ERROR: &str = "Error";

pub const MOTION_ENABLE: &str = "Enable Motion Detection";
pub const MOTION_DISABLE: &str = "Disable Motion Detection";

const LAST_UPDATE_NEVER: &str = "--:--:--";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayView {
    pub status_text: &'static str,
    pub system_status: &'static str,
    pub motion_button: &'static str,
    pub motion_status: &'static str,
    pub show_status: &'static str,
    pub audience_count: u64,
    pub scare_count: u64,
    pub show_time: String,
    pub stats_status: &'static str,
    pub last_update: String,
}

impl From<&ControllerState> for DisplayView {
    fn from(state: &ControllerState) -> Self {
        let status = state.status;

        let status_text = match (state.synced, status.initialized) {
            (false, _) => STATUS_CONNECTING,
            (true, true) => STATUS_ONLINE,
            (true, false) => STATUS_OFFLINE,
        };

        let system_status = if state.status_error {
            LINK_ERROR
        } else if !state.synced {
            LINK_UNKNOWN
        } else if status.initialized {
            LINK_CONNECTED
        } else {
            LINK_DISCONNECTED
        };

        let (motion_button, motion_status) = if status.motion_enabled {
            (MOTION_DISABLE, "Enabled")
        } else {
            (MOTION_ENABLE, "Disabled")
        };

        let last_update = state.last_update.map_or_else(
            || LAST_UPDATE_NEVER.to_owned(),
            |at| format!("{:02}:{:02}:{:02}", at.hour(), at.minute(), at.second()),
        );

        Self {
            status_text,
            system_status,
            motion_button,
            motion_status,
            show_status: if status.show_active { "Active" } else { "Inactive" },
            audience_count: state.stats.total_audience,
            scare_count: state.stats.total_scares,
            show_time: state.stats.show_duration.clone(),
            stats_status: if state.stats_error { LINK_ERROR } else { "OK" },
            last_update,
        }
    }
}

impl fmt::Display for DisplayView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) | motion: {} | show: {} | audience: {} scares: {} time: {} | stats: {} | updated {}",
            self.status_text,
            self.system_status,
            self.motion_status,
            self.show_status,
            self.audience_count,
            self.scare_count,
            self.show_time,
            self.stats_status,
            self.last_update,
        )
    }
}

#[cfg(test)]
#[path = "display_test.rs"]
mod tests;
