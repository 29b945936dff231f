use super::*;
use crate::api::Transport;
use crate::api::test_helpers::FakeTransport;
use crate::client::{STATS_PATH, STATUS_PATH};
use crate::config::ClientConfig;
use serde_json::json;

fn started_client(fake: &Arc<FakeTransport>) -> (Arc<RemoteControlClient>, Pollers) {
    let transport: Arc<dyn Transport> = fake.clone();
    let client = Arc::new(RemoteControlClient::with_transport(transport, &ClientConfig::default()));
    let pollers = client.start().expect("first start spawns pollers");
    (client, pollers)
}

fn online_fake() -> Arc<FakeTransport> {
    let fake = Arc::new(FakeTransport::new());
    fake.respond(
        "GET",
        STATUS_PATH,
        200,
        json!({ "scarepi_initialized": true, "motion_enabled": false, "show_active": false }),
    );
    fake.respond("GET", STATS_PATH, 200, json!({ "total_audience": 2, "total_scares": 9, "show_duration": "0:03:00" }));
    fake
}

#[tokio::test(start_paused = true)]
async fn first_tick_polls_immediately() {
    let fake = online_fake();
    let (client, _pollers) = started_client(&fake);

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(fake.count("GET", STATUS_PATH), 1);
    assert_eq!(fake.count("GET", STATS_PATH), 1);

    let view = client.view();
    assert_eq!(view.status_text, "System Online");
    assert_eq!(view.audience_count, 2);
}

#[tokio::test(start_paused = true)]
async fn status_and_stats_tick_on_independent_schedules() {
    let fake = online_fake();
    let (_client, _pollers) = started_client(&fake);

    tokio::time::sleep(Duration::from_millis(10_010)).await;
    // status: 0, 2, 4, 6, 8, 10 s; stats: 0, 5, 10 s
    assert_eq!(fake.count("GET", STATUS_PATH), 6);
    assert_eq!(fake.count("GET", STATS_PATH), 3);
}

#[tokio::test(start_paused = true)]
async fn slow_responses_do_not_stretch_the_period() {
    let fake = Arc::new(FakeTransport::new());
    fake.respond_after("GET", STATUS_PATH, Duration::from_secs(30), 200, json!({}));
    fake.respond("GET", STATS_PATH, 200, json!({}));
    let (client, _pollers) = started_client(&fake);

    tokio::time::sleep(Duration::from_millis(4_010)).await;
    assert_eq!(fake.count("GET", STATUS_PATH), 3);
    assert!(!client.snapshot().synced);
}

#[tokio::test(start_paused = true)]
async fn failing_poll_keeps_ticking_and_marks_error() {
    let fake = Arc::new(FakeTransport::new());
    fake.fail("GET", STATUS_PATH, "connection refused");
    fake.respond("GET", STATS_PATH, 200, json!({}));
    let (client, _pollers) = started_client(&fake);

    tokio::time::sleep(Duration::from_millis(4_010)).await;
    assert_eq!(fake.count("GET", STATUS_PATH), 3);
    assert_eq!(client.view().system_status, "Error");
    assert!(!client.snapshot().stats_error);
}

#[tokio::test(start_paused = true)]
async fn start_is_idempotent() {
    let fake = online_fake();
    let (client, _pollers) = started_client(&fake);
    assert!(client.start().is_none());

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(fake.count("GET", STATUS_PATH), 1);
}
