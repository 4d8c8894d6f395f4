use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::log_warn;
use crate::models::OngoingEventTimeSummary;

use super::ApiClient;

const ENABLE_LOGS: bool = true;

/// Event transitions and the ongoing-summary fetch. The backend closes the
/// current interval and opens the new one; clients only ever request
/// transitions and re-fetch.
#[async_trait]
pub trait EventGateway: Send + Sync {
    /// Snapshot of the accounting windows anchored at `day_start`. Fails soft
    /// to an empty idling snapshot.
    async fn ongoing_summary(&self, day_start: DateTime<Local>) -> OngoingEventTimeSummary;

    async fn start_idling(&self) -> bool;
    async fn start_interruption(&self, id: i64) -> bool;
    async fn start_task(&self, id: i64) -> bool;
    async fn start_break(&self, target_duration_ms: u64) -> bool;
    async fn skip_break(&self) -> bool;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StartBreakBody {
    target_duration_ms: u64,
}

#[derive(Clone)]
pub struct EventHttpService {
    client: ApiClient,
}

impl EventHttpService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn transition(&self, label: &str, path: &str) -> bool {
        match self.client.post_empty::<bool>(path).await {
            Ok(accepted) => accepted,
            Err(err) => {
                log_warn!("{label} request failed: {err}");
                false
            }
        }
    }
}

#[async_trait]
impl EventGateway for EventHttpService {
    async fn ongoing_summary(&self, day_start: DateTime<Local>) -> OngoingEventTimeSummary {
        let path = format!("events/time-summary?start={}", day_start.to_rfc3339());
        match self.client.get_json(&path).await {
            Ok(summary) => summary,
            Err(err) => {
                log_warn!("ongoing summary fetch failed: {err}");
                OngoingEventTimeSummary::empty(Utc::now())
            }
        }
    }

    async fn start_idling(&self) -> bool {
        self.transition("start idling", "events/idling").await
    }

    async fn start_interruption(&self, id: i64) -> bool {
        self.transition("start interruption", &format!("events/interruption/{id}"))
            .await
    }

    async fn start_task(&self, id: i64) -> bool {
        self.transition("start task", &format!("events/task/{id}"))
            .await
    }

    async fn start_break(&self, target_duration_ms: u64) -> bool {
        let body = StartBreakBody { target_duration_ms };
        match self.client.post_json::<_, bool>("events/break/start", &body).await {
            Ok(accepted) => accepted,
            Err(err) => {
                log_warn!("start break request failed: {err}");
                false
            }
        }
    }

    async fn skip_break(&self) -> bool {
        self.transition("skip break", "events/break/skip").await
    }
}
