//! OAuth status poller
//!
//! Drives one session to a terminal outcome by correlating three signals on
//! a fixed tick: the authorization window's lifecycle, the number of
//! attempts made, and the status reported by the backend.
//!
//! A failing status *query* is transient and polling continues. A `failed`
//! *status* is terminal. Keeping the two apart prevents a single network blip
//! from abandoning a flow the user is still completing.

use std::sync::Arc;
use std::time::Duration;

use creatorlink_domain::constants::{
    DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL_SECS, GENERIC_OAUTH_FAILURE,
};
use creatorlink_domain::{OAuthFlowConfig, OAuthOutcome, OAuthStatus, OAuthStatusKind};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, instrument, warn};

use super::ports::OAuthBackend;
use super::session::OAuthSession;
use crate::connections::ports::ConnectionsBackend;

/// Polling cadence and bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            max_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
        }
    }
}

impl From<&OAuthFlowConfig> for PollerConfig {
    fn from(config: &OAuthFlowConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.poll_interval_seconds.max(1)),
            max_attempts: config.max_poll_attempts,
        }
    }
}

/// Result of handling one backend status.
enum Step {
    Continue,
    Done(OAuthOutcome),
}

/// Polls the backend until an OAuth session resolves
pub struct StatusPoller {
    oauth: Arc<dyn OAuthBackend>,
    connections: Arc<dyn ConnectionsBackend>,
    config: PollerConfig,
}

impl StatusPoller {
    pub fn new(
        oauth: Arc<dyn OAuthBackend>,
        connections: Arc<dyn ConnectionsBackend>,
        config: PollerConfig,
    ) -> Self {
        Self { oauth, connections, config }
    }

    /// Poll until the session reaches exactly one terminal outcome.
    ///
    /// The first check happens one interval after the call. When the outcome
    /// is anything but `Cancelled` the authorization window has been closed.
    #[instrument(skip(self, session), fields(session_id = %session.id, platform = %session.platform))]
    pub async fn run(&self, session: &OAuthSession) -> OAuthOutcome {
        let period = self.config.interval;
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut attempts: u32 = 0;

        loop {
            ticker.tick().await;

            if session.popup.is_closed() {
                info!(attempts, "authorization window closed by user");
                return OAuthOutcome::Cancelled;
            }

            attempts += 1;
            if attempts > self.config.max_attempts {
                session.popup.close();
                info!(attempts = self.config.max_attempts, "OAuth flow timed out");
                return OAuthOutcome::TimedOut;
            }

            let status = match self.oauth.status(&session.state, &session.platform).await {
                Ok(status) => status,
                Err(err) => {
                    warn!(
                        attempt = attempts,
                        transient = err.is_transient(),
                        error = %err,
                        "OAuth status check failed, will retry"
                    );
                    continue;
                }
            };

            if let Step::Done(outcome) = self.handle_status(session, status, attempts).await {
                info!(outcome = outcome.label(), attempts, "OAuth flow resolved");
                return outcome;
            }
        }
    }

    async fn handle_status(&self, session: &OAuthSession, status: OAuthStatus, attempt: u32) -> Step {
        match status.status {
            OAuthStatusKind::Pending => {
                debug!(attempt, "OAuth flow pending");
                Step::Continue
            }
            OAuthStatusKind::Completed => {
                let Some(connection_id) = status.connection_id else {
                    debug!(attempt, "completed status without connection id, still waiting");
                    return Step::Continue;
                };

                // The window stays open until the record is in hand: a closed
                // window would read as a cancellation on the next tick.
                match self.connections.get_connection(&connection_id).await {
                    Ok(connection) => {
                        session.popup.close();
                        Step::Done(OAuthOutcome::Completed { connection })
                    }
                    Err(err) => {
                        warn!(
                            attempt,
                            %connection_id,
                            transient = err.is_transient(),
                            error = %err,
                            "failed to fetch new connection, will retry"
                        );
                        Step::Continue
                    }
                }
            }
            OAuthStatusKind::Failed => {
                session.popup.close();
                let message = status
                    .error_message
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| GENERIC_OAUTH_FAILURE.to_string());
                Step::Done(OAuthOutcome::Failed { message })
            }
            OAuthStatusKind::Expired => {
                session.popup.close();
                Step::Done(OAuthOutcome::Expired)
            }
        }
    }
}
