//! Remote control client: command dispatch and state polling.
//!
//! DESIGN
//! ======
//! Every remote call is isolated: it resolves into either a cache update,
//! an error marker on the cache, or a notification, and never panics or
//! retries. Commands are not serialized against each other or against the
//! pollers; the state mutex is only taken between awaits.
//!
//! ERROR HANDLING
//! ==============
//! Commands return `CommandResult`: a failed command is an outcome shown to
//! the user. Polls return `Result`, but the cache has already been updated
//! (or marked) by the time they return.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;
use time::OffsetDateTime;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::api::types::{self, AudienceRegistration, MessageBody, StatsBody, StatusBody};
use crate::api::{HttpTransport, Transport};
use crate::command::{Command, GENERIC_FAILURE, ScareKind};
use crate::config::{ClientConfig, PollIntervals};
use crate::display::DisplayView;
use crate::error::ClientError;
use crate::notify::{Notification, NotificationKind, Notifications};
use crate::poller::{self, Pollers};
use crate::state::{AudienceStats, ControllerState, SystemStatus};

pub const STATUS_PATH: &str = "/api/status";
pub const STATS_PATH: &str = "/api/audience/stats";
pub const JOIN_PATH: &str = "/api/audience/join";
pub const QR_PATH: &str = "/qr";

const JOIN_SUCCESS: &str = "Welcome to the show!";
const JOIN_FAILURE: &str = "Failed to join audience";
const QR_FAILURE: &str = "QR code unavailable";

// =============================================================================
// COMMAND RESULT
// =============================================================================

/// Outcome of a POST command, ready to show to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub ok: bool,
    pub message: String,
}

impl CommandResult {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self { ok: true, message: message.into() }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self { ok: false, message: message.into() }
    }

    #[must_use]
    pub fn kind(&self) -> NotificationKind {
        if self.ok { NotificationKind::Success } else { NotificationKind::Error }
    }
}

impl From<Result<String, ClientError>> for CommandResult {
    fn from(outcome: Result<String, ClientError>) -> Self {
        match outcome {
            Ok(message) => Self::success(message),
            Err(err) => Self::failure(err.user_message()),
        }
    }
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct RemoteControlClient {
    transport: Arc<dyn Transport>,
    state: Mutex<ControllerState>,
    notifications: Notifications,
    poll: PollIntervals,
    status_seq: AtomicU64,
    stats_seq: AtomicU64,
    started: AtomicBool,
}

impl RemoteControlClient {
    /// Build a client that talks HTTP to `config.base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(&config.base_url, config.timeouts)?;
        debug!(base_url = transport.base_url(), "http transport ready");
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>, config: &ClientConfig) -> Self {
        Self {
            transport,
            state: Mutex::new(ControllerState::new()),
            notifications: Notifications::new(config.notification_ttl),
            poll: config.poll,
            status_seq: AtomicU64::new(0),
            stats_seq: AtomicU64::new(0),
            started: AtomicBool::new(false),
        }
    }

    /// Spawn the status and stats pollers. Only the first call has an effect.
    ///
    /// The pollers run for the life of the runtime; there is no stop.
    pub fn start(self: &Arc<Self>) -> Option<Pollers> {
        if self
            .started
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("pollers already running");
            return None;
        }
        info!(status_every = ?self.poll.status, stats_every = ?self.poll.stats, "starting pollers");
        Some(poller::spawn_pollers(Arc::clone(self), self.poll))
    }

    // -------------------------------------------------------------------------
    // POLLING
    // -------------------------------------------------------------------------

    /// Fetch `/api/status` and reconcile the cache with it.
    ///
    /// # Errors
    ///
    /// Returns the failure after marking the display as errored; the cached
    /// status is left as it was.
    pub async fn poll_status(&self) -> Result<SystemStatus, ClientError> {
        let seq = self.status_seq.fetch_add(1, Ordering::Relaxed) + 1;
        let result = self.fetch::<StatusBody>(STATUS_PATH).await.map(SystemStatus::from);

        let applied = {
            let mut state = self.lock_state();
            match &result {
                Ok(status) => state.apply_status(seq, *status, OffsetDateTime::now_utc()),
                Err(_) => state.mark_status_error(seq),
            }
        };

        match &result {
            Err(e) => warn!(seq, error = %e, "status poll failed"),
            Ok(_) if !applied => debug!(seq, "discarding stale status poll"),
            Ok(status) => debug!(seq, ?status, "status poll applied"),
        }
        result
    }

    /// Fetch `/api/audience/stats` and replace the cached stats with it.
    ///
    /// # Errors
    ///
    /// Returns the failure after marking the stats as errored; the cached
    /// stats are left as they were.
    pub async fn poll_audience_stats(&self) -> Result<AudienceStats, ClientError> {
        let seq = self.stats_seq.fetch_add(1, Ordering::Relaxed) + 1;
        let result = self.fetch::<StatsBody>(STATS_PATH).await.map(AudienceStats::from);

        let applied = {
            let mut state = self.lock_state();
            match &result {
                Ok(stats) => state.apply_stats(seq, stats.clone()),
                Err(_) => state.mark_stats_error(seq),
            }
        };

        match &result {
            Err(e) => warn!(seq, error = %e, "audience stats poll failed"),
            Ok(_) if !applied => debug!(seq, "discarding stale stats poll"),
            Ok(_) => {}
        }
        result
    }

    // -------------------------------------------------------------------------
    // COMMANDS
    // -------------------------------------------------------------------------

    /// POST an empty JSON body to `endpoint` and notify the outcome.
    ///
    /// Success text is the server `message` or `default_message`; failure
    /// text is the server `error`/`message`, the transport error, or a
    /// generic fallback.
    pub async fn send_command(&self, endpoint: &str, default_message: &str) -> CommandResult {
        let outcome = self.execute(endpoint, default_message, GENERIC_FAILURE).await;
        self.report(endpoint, outcome.into())
    }

    /// Send a known command, applying its optimistic cache update on success.
    pub async fn dispatch(&self, command: Command) -> CommandResult {
        let outcome = self
            .execute(command.path(), command.default_message(), command.fallback_message())
            .await;

        if outcome.is_ok() {
            let mut state = self.lock_state();
            match command {
                Command::ToggleMotion => {
                    let enabled = state.flip_motion();
                    debug!(enabled, "motion flag flipped optimistically");
                }
                Command::StartShow => state.set_show_active(true),
                Command::StopShow => state.set_show_active(false),
                Command::Scare(_) => {}
            }
        }

        self.report(&command.to_string(), outcome.into())
    }

    /// Flip motion detection. The cached flag flips on acknowledgment without
    /// re-polling; the next status poll reconciles it.
    pub async fn toggle_motion(&self) -> CommandResult {
        self.dispatch(Command::ToggleMotion).await
    }

    pub async fn trigger_scare(&self, kind: ScareKind) -> CommandResult {
        self.dispatch(Command::Scare(kind)).await
    }

    pub async fn start_show(&self) -> CommandResult {
        self.dispatch(Command::StartShow).await
    }

    pub async fn stop_show(&self) -> CommandResult {
        self.dispatch(Command::StopShow).await
    }

    /// Register an audience member. Succeeds only on a 2xx with `success: true`.
    pub async fn join_audience(&self, registration: &AudienceRegistration) -> CommandResult {
        let outcome = match serde_json::to_value(registration) {
            Ok(body) => self.join_outcome(&body).await,
            Err(e) => Err(ClientError::Malformed(e.to_string())),
        };
        self.report("audience:join", outcome.into())
    }

    async fn join_outcome(&self, body: &Value) -> Result<String, ClientError> {
        let reply = self.transport.post(JOIN_PATH, Some(body)).await?;
        if !reply.is_success() {
            return Err(ClientError::Application {
                status: reply.status,
                message: types::failure_message(&reply.body, JOIN_FAILURE),
            });
        }

        let body = MessageBody::parse(&reply.body)?;
        if body.success == Some(true) {
            return Ok(body.message().unwrap_or(JOIN_SUCCESS).to_owned());
        }
        // EDGE: 2xx with success=false is how the backend reports a duplicate email.
        let message = body
            .message()
            .or_else(|| body.error())
            .unwrap_or(JOIN_FAILURE)
            .to_owned();
        Err(ClientError::Application { status: reply.status, message })
    }

    /// Resolve the URL of the QR code image served at `/qr`.
    ///
    /// # Errors
    ///
    /// Returns the failure after raising an error notification.
    pub async fn qr_code_url(&self) -> Result<String, ClientError> {
        let result = match self.transport.get(QR_PATH).await {
            Ok(reply) if reply.is_success() => Ok(reply.url),
            Ok(reply) => Err(ClientError::Application {
                status: reply.status,
                message: types::failure_message(&reply.body, QR_FAILURE),
            }),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            self.notifications
                .push(NotificationKind::Error, format!("Failed to generate QR code: {e}"));
        }
        result
    }

    // -------------------------------------------------------------------------
    // READ SIDE
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn snapshot(&self) -> ControllerState {
        self.lock_state().clone()
    }

    #[must_use]
    pub fn view(&self) -> DisplayView {
        DisplayView::from(&*self.lock_state())
    }

    /// Currently visible notifications, oldest first.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.visible()
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notifications.subscribe()
    }

    /// Raise an informational notification that is not tied to a remote call.
    pub fn announce(&self, text: impl Into<String>) -> Notification {
        self.notifications.push(NotificationKind::Info, text)
    }

    // -------------------------------------------------------------------------
    // INTERNALS
    // -------------------------------------------------------------------------

    async fn fetch<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let reply = self.transport.get(path).await?;
        if !reply.is_success() {
            let fallback = format!("HTTP {}", reply.status);
            return Err(ClientError::Application {
                status: reply.status,
                message: types::failure_message(&reply.body, &fallback),
            });
        }
        types::decode(&reply.body)
    }

    async fn execute(&self, path: &str, default_message: &str, fallback: &str) -> Result<String, ClientError> {
        let reply = self.transport.post(path, None).await?;
        if !reply.is_success() {
            return Err(ClientError::Application {
                status: reply.status,
                message: types::failure_message(&reply.body, fallback),
            });
        }
        let body = MessageBody::parse(&reply.body)?;
        Ok(body.message().unwrap_or(default_message).to_owned())
    }

    fn report(&self, label: &str, result: CommandResult) -> CommandResult {
        debug!(command = label, ok = result.ok, "command finished");
        self.notifications.push(result.kind(), result.message.clone());
        result
    }

    fn lock_state(&self) -> MutexGuard<'_, ControllerState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
