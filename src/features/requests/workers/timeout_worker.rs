use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use tokio::time::interval;

use crate::core::config::RequestTimeoutConfig;
use crate::core::error::Result;
use crate::features::requests::services::RequestService;

/// Background worker that times out stale open requests.
///
/// Open requests older than the configured age move to `timeout` so they
/// stop showing up in nearby searches. Sweep failures are logged and the
/// next tick tries again.
pub struct RequestTimeoutWorker {
    request_service: Arc<RequestService>,
    config: RequestTimeoutConfig,
}

impl RequestTimeoutWorker {
    pub fn new(request_service: Arc<RequestService>, config: RequestTimeoutConfig) -> Self {
        Self {
            request_service,
            config,
        }
    }

    /// Run the worker in a background loop
    pub async fn run(&self) {
        tracing::info!(
            "Starting request timeout worker (max open age: {}s, sweep every {}s)",
            self.config.max_open_age.as_secs(),
            self.config.sweep_interval.as_secs()
        );

        let mut interval = interval(self.config.sweep_interval);

        loop {
            interval.tick().await;

            if let Err(e) = self.sweep().await {
                tracing::error!("Error sweeping stale requests: {:?}", e);
            }
        }
    }

    /// Time out every open request older than the configured age
    async fn sweep(&self) -> Result<()> {
        let cutoff = Utc::now() - ChronoDuration::seconds(self.config.max_open_age.as_secs() as i64);

        let timed_out = self.request_service.timeout_stale(cutoff).await?;
        if timed_out > 0 {
            tracing::info!("Timed out {} stale open requests", timed_out);
        }

        Ok(())
    }
}
