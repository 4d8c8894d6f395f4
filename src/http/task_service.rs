use async_trait::async_trait;
use chrono::{DateTime, Local};

use crate::log_warn;
use crate::models::{TaskItem, TaskSummary};

use super::ApiClient;

const ENABLE_LOGS: bool = true;

/// CRUD for task items. Task summaries come back as one flat list; the
/// unresolved/resolved split only exists for interruptions.
#[async_trait]
pub trait TaskGateway: Send + Sync {
    async fn summaries(&self, day_start: DateTime<Local>) -> Vec<TaskSummary>;
    async fn item(&self, id: i64) -> Option<TaskItem>;
    async fn create(&self, item: &TaskItem) -> Option<TaskItem>;
    async fn update(&self, item: &TaskItem) -> Option<TaskItem>;
    async fn delete(&self, id: i64) -> bool;
}

#[derive(Clone)]
pub struct TaskHttpService {
    client: ApiClient,
}

impl TaskHttpService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TaskGateway for TaskHttpService {
    async fn summaries(&self, day_start: DateTime<Local>) -> Vec<TaskSummary> {
        let path = format!("task-items/summaries?start={}", day_start.to_rfc3339());
        match self.client.get_json(&path).await {
            Ok(summaries) => summaries,
            Err(err) => {
                log_warn!("task summaries fetch failed: {err}");
                Vec::new()
            }
        }
    }

    async fn item(&self, id: i64) -> Option<TaskItem> {
        match self.client.get_json(&format!("task-items/{id}")).await {
            Ok(item) => Some(item),
            Err(err) => {
                log_warn!("task item {id} fetch failed: {err}");
                None
            }
        }
    }

    async fn create(&self, item: &TaskItem) -> Option<TaskItem> {
        match self.client.post_json("task-items", item).await {
            Ok(created) => Some(created),
            Err(err) => {
                log_warn!("task create failed: {err}");
                None
            }
        }
    }

    async fn update(&self, item: &TaskItem) -> Option<TaskItem> {
        match self.client.put_json("task-items", item).await {
            Ok(updated) => Some(updated),
            Err(err) => {
                log_warn!("task {} update failed: {err}", item.id);
                None
            }
        }
    }

    async fn delete(&self, id: i64) -> bool {
        match self
            .client
            .delete_json::<bool>(&format!("task-items/{id}"))
            .await
        {
            Ok(deleted) => deleted,
            Err(err) => {
                log_warn!("task {id} delete failed: {err}");
                false
            }
        }
    }
}
