use std::sync::Arc;

use chrono::Local;
use tokio::sync::Mutex;

use crate::http::TaskGateway;
use crate::models::task::compare_task_summaries;
use crate::models::{EventType, TaskItem, TaskSummary};
use crate::utils::time::local_day_start;

use super::editor::{Editor, EditorState};

struct Inner {
    summaries: Vec<TaskSummary>,
    editor: Editor<TaskItem>,
}

/// Task list and editor state. Unlike interruptions the backend serves one
/// flat list and the sort is plain queue order (id ascending); effort never
/// influences ordering.
#[derive(Clone)]
pub struct TaskStore {
    inner: Arc<Mutex<Inner>>,
    gateway: Arc<dyn TaskGateway>,
}

impl TaskStore {
    pub fn new(gateway: Arc<dyn TaskGateway>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                summaries: Vec::new(),
                editor: Editor::new(),
            })),
            gateway,
        }
    }

    pub async fn load_summaries(&self) {
        let day_start = local_day_start(Local::now());
        let summaries = self.gateway.summaries(day_start).await;
        self.inner.lock().await.summaries = summaries;
    }

    /// Tasks whose name contains `search` (case-insensitive; an empty search
    /// matches everything), in queue order.
    pub async fn filtered_summaries(&self, search: &str) -> Vec<TaskSummary> {
        let needle = search.to_lowercase();
        let inner = self.inner.lock().await;
        let mut matches: Vec<TaskSummary> = inner
            .summaries
            .iter()
            .filter(|s| needle.is_empty() || s.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        matches.sort_by(compare_task_summaries);
        matches
    }

    /// Cross-references the event store's active work item against the task
    /// list; `None` for other domains or an id the list does not contain.
    pub async fn active_summary(&self, active: Option<(EventType, i64)>) -> Option<TaskSummary> {
        let (event_type, id) = active?;
        if event_type != EventType::Task {
            return None;
        }
        self.inner
            .lock()
            .await
            .summaries
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    pub async fn start_item_create(&self) {
        self.inner.lock().await.editor.request_open(TaskItem::draft());
    }

    pub async fn start_item_edit(&self, id: i64) -> bool {
        self.inner.lock().await.editor.close();
        match self.gateway.item(id).await {
            Some(item) => {
                self.inner.lock().await.editor.request_open(item);
                true
            }
            None => false,
        }
    }

    pub async fn finish_editor_transition(&self) {
        self.inner.lock().await.editor.settle();
    }

    pub async fn stop_item_edit(&self) {
        self.inner.lock().await.editor.close();
    }

    pub async fn editing_item(&self) -> Option<TaskItem> {
        self.inner.lock().await.editor.item().cloned()
    }

    pub async fn editor_state(&self) -> EditorState<TaskItem> {
        self.inner.lock().await.editor.state().clone()
    }

    pub async fn create_item(&self, item: TaskItem) -> bool {
        match self.gateway.create(&item).await {
            Some(created) => {
                let mut inner = self.inner.lock().await;
                inner.summaries.push(created.summary());
                inner.editor.request_open(created);
                true
            }
            None => false,
        }
    }

    /// Saves an edited task; the open editor is replaced only when it shows
    /// the same id, so a stale late response cannot clobber another editor.
    pub async fn update_item(&self, item: TaskItem) -> bool {
        match self.gateway.update(&item).await {
            Some(updated) => {
                let mut inner = self.inner.lock().await;
                if let Some(summary) = inner.summaries.iter_mut().find(|s| s.id == updated.id) {
                    *summary = updated.summary();
                }
                if inner.editor.item().map(|i| i.id) == Some(updated.id) {
                    inner.editor.replace(updated);
                }
                true
            }
            None => false,
        }
    }

    pub async fn delete_item(&self, id: i64) -> bool {
        if !self.gateway.delete(id).await {
            return false;
        }
        let mut inner = self.inner.lock().await;
        inner.summaries.retain(|s| s.id != id);
        if inner.editor.item().map(|i| i.id) == Some(id) {
            inner.editor.close();
        }
        true
    }
}
