//! Fire-and-forget trigger for the external sprint sync worker.
//!
//! The worker recomputes derived sprint data (member summaries and the
//! like). This side only owns the notification contract: sprint id plus an
//! `is_active` hint the worker uses for prioritisation. Delivery runs in a
//! detached task and never blocks or fails the request that triggered it.

use retroflect_core::types::DbId;

/// HTTP client for the worker's job intake endpoint.
pub struct SprintQueue {
    http: reqwest::Client,
    endpoint: Option<String>,
}

impl SprintQueue {
    /// Build a queue client. `worker_url` is the worker's base URL; when
    /// unset (local development, tests) notifications are dropped with a
    /// debug log.
    pub fn new(worker_url: Option<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("failed to build worker HTTP client");
        let endpoint = worker_url.map(|url| format!("{}/jobs/sprint-refresh", url.trim_end_matches('/')));
        Self { http, endpoint }
    }

    /// Ask the worker to refresh the sprint's derived data.
    pub fn notify(&self, sprint_id: DbId, is_active: bool) {
        let Some(endpoint) = self.endpoint.clone() else {
            tracing::debug!(sprint_id, "no worker configured, dropping sprint refresh");
            return;
        };
        let http = self.http.clone();
        tokio::spawn(async move {
            let body = serde_json::json!({ "sprint_id": sprint_id, "is_active": is_active });
            match http.post(&endpoint).json(&body).send().await {
                Ok(response) if response.status().is_success() => {
                    tracing::info!(sprint_id, is_active, "queued sprint refresh");
                }
                Ok(response) => {
                    tracing::error!(sprint_id, status = %response.status(), "worker rejected sprint refresh");
                }
                Err(err) => {
                    tracing::error!(sprint_id, error = %err, "failed to reach sprint worker");
                }
            }
        });
    }
}
