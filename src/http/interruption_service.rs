use async_trait::async_trait;
use chrono::{DateTime, Local};

use crate::log_warn;
use crate::models::{InterruptionItem, InterruptionSummaries};

use super::ApiClient;

const ENABLE_LOGS: bool = true;

/// CRUD plus resolve for interruption items. Summaries come back bucketed
/// into unresolved and resolved.
#[async_trait]
pub trait InterruptionGateway: Send + Sync {
    async fn summaries(&self, day_start: DateTime<Local>) -> InterruptionSummaries;
    async fn item(&self, id: i64) -> Option<InterruptionItem>;
    async fn create(&self, item: &InterruptionItem) -> Option<InterruptionItem>;
    async fn update(&self, item: &InterruptionItem) -> Option<InterruptionItem>;
    async fn delete(&self, id: i64) -> bool;
    async fn resolve(&self, item: &InterruptionItem) -> bool;
}

#[derive(Clone)]
pub struct InterruptionHttpService {
    client: ApiClient,
}

impl InterruptionHttpService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InterruptionGateway for InterruptionHttpService {
    async fn summaries(&self, day_start: DateTime<Local>) -> InterruptionSummaries {
        let path = format!(
            "interruption-items/summaries?start={}",
            day_start.to_rfc3339()
        );
        match self.client.get_json(&path).await {
            Ok(summaries) => summaries,
            Err(err) => {
                log_warn!("interruption summaries fetch failed: {err}");
                InterruptionSummaries::default()
            }
        }
    }

    async fn item(&self, id: i64) -> Option<InterruptionItem> {
        match self.client.get_json(&format!("interruption-items/{id}")).await {
            Ok(item) => Some(item),
            Err(err) => {
                log_warn!("interruption item {id} fetch failed: {err}");
                None
            }
        }
    }

    async fn create(&self, item: &InterruptionItem) -> Option<InterruptionItem> {
        match self.client.post_json("interruption-items", item).await {
            Ok(created) => Some(created),
            Err(err) => {
                log_warn!("interruption create failed: {err}");
                None
            }
        }
    }

    async fn update(&self, item: &InterruptionItem) -> Option<InterruptionItem> {
        match self.client.put_json("interruption-items", item).await {
            Ok(updated) => Some(updated),
            Err(err) => {
                log_warn!("interruption {} update failed: {err}", item.id);
                None
            }
        }
    }

    async fn delete(&self, id: i64) -> bool {
        match self
            .client
            .delete_json::<bool>(&format!("interruption-items/{id}"))
            .await
        {
            Ok(deleted) => deleted,
            Err(err) => {
                log_warn!("interruption {id} delete failed: {err}");
                false
            }
        }
    }

    async fn resolve(&self, item: &InterruptionItem) -> bool {
        match self
            .client
            .put_json::<_, bool>("interruption-items/resolve", item)
            .await
        {
            Ok(resolved) => resolved,
            Err(err) => {
                log_warn!("interruption {} resolve failed: {err}", item.id);
                false
            }
        }
    }
}
