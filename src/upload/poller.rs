use crate::upload::client::AnalysisClient;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Matches the 3000 ms the service's own web client polls at.
pub const POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Handle the UI thread keeps so it can tear the poll loop down on
/// reset or shutdown.
#[derive(Clone, Default)]
pub struct PollCancellation(Arc<AtomicBool>);

impl PollCancellation {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Repeating status probe for an accepted job. Runs until the server
/// reports `complete` or the handle is cancelled; probe failures are
/// logged and retried at the same fixed interval.
pub struct StatusPoller {
    client: AnalysisClient,
    filename: String,
    interval: Duration,
    cancellation: PollCancellation,
}

impl StatusPoller {
    pub fn new(client: AnalysisClient, filename: impl Into<String>) -> Self {
        Self {
            client,
            filename: filename.into(),
            interval: POLL_INTERVAL,
            cancellation: PollCancellation::default(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_cancellation(mut self, cancellation: PollCancellation) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn cancellation(&self) -> PollCancellation {
        self.cancellation.clone()
    }

    /// True when the analysis completed; false when cancelled first.
    pub async fn poll_until_complete(&self) -> bool {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // the first tick fires immediately; the first probe waits one period
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if self.cancellation.is_cancelled() {
                debug!(filename = %self.filename, "status polling cancelled");
                return false;
            }
            match self.client.check_status(&self.filename).await {
                Ok(true) => {
                    debug!(filename = %self.filename, "analysis complete");
                    return true;
                }
                Ok(false) => {}
                Err(e) => {
                    warn!(filename = %self.filename, error = %e, "status check failed, will retry");
                }
            }
        }
    }
}
