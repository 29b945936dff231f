use super::*;
use crate::state::{AudienceStats, SystemStatus};
use time::macros::datetime;

fn synced(status: SystemStatus) -> ControllerState {
    let mut state = ControllerState::new();
    state.apply_status(1, status, datetime!(2025-10-31 21:07:03 UTC));
    state
}

#[test]
fn unsynced_state_shows_connecting() {
    let view = DisplayView::from(&ControllerState::new());
    assert_eq!(view.status_text, STATUS_CONNECTING);
    assert_eq!(view.system_status, LINK_UNKNOWN);
    assert_eq!(view.last_update, "--:--:--");
    assert_eq!(view.show_time, "0:00:00");
}

#[test]
fn online_with_motion_off_offers_enable() {
    let view = DisplayView::from(&synced(SystemStatus {
        initialized: true,
        motion_enabled: false,
        show_active: false,
    }));
    assert_eq!(view.status_text, "System Online");
    assert_eq!(view.system_status, "Connected");
    assert_eq!(view.motion_button, "Enable Motion Detection");
    assert_eq!(view.motion_status, "Disabled");
    assert_eq!(view.show_status, "Inactive");
    assert_eq!(view.last_update, "21:07:03");
}

#[test]
fn motion_on_offers_disable() {
    let view = DisplayView::from(&synced(SystemStatus {
        initialized: true,
        motion_enabled: true,
        show_active: true,
    }));
    assert_eq!(view.motion_button, "Disable Motion Detection");
    assert_eq!(view.motion_status, "Enabled");
    assert_eq!(view.show_status, "Active");
}

#[test]
fn uninitialized_backend_is_offline() {
    let view = DisplayView::from(&synced(SystemStatus::default()));
    assert_eq!(view.status_text, "System Offline");
    assert_eq!(view.system_status, "Disconnected");
}

#[test]
fn status_error_marks_link_but_keeps_cached_labels() {
    let mut state = synced(SystemStatus { initialized: true, motion_enabled: true, show_active: false });
    state.mark_status_error(2);
    let view = DisplayView::from(&state);
    assert_eq!(view.system_status, "Error");
    assert_eq!(view.status_text, "System Online");
    assert_eq!(view.motion_button, "Disable Motion Detection");
}

#[test]
fn stats_fields_and_stats_error() {
    let mut state = ControllerState::new();
    state.apply_stats(
        1,
        AudienceStats { total_audience: 7, youtube_subscribers: 1, total_scares: 13, show_duration: "0:13:00".into() },
    );
    state.mark_stats_error(2);
    let view = DisplayView::from(&state);
    assert_eq!(view.audience_count, 7);
    assert_eq!(view.scare_count, 13);
    assert_eq!(view.show_time, "0:13:00");
    assert_eq!(view.stats_status, "Error");
}

#[test]
fn display_line_mentions_key_fields() {
    let line = DisplayView::from(&synced(SystemStatus { initialized: true, ..SystemStatus::default() })).to_string();
    assert!(line.starts_with("System Online (Connected)"));
    assert!(line.contains("motion: Disabled"));
    assert!(line.ends_with("updated 21:07:03"));
}
