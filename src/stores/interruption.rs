use std::sync::Arc;

use chrono::Local;
use tokio::sync::Mutex;

use crate::http::InterruptionGateway;
use crate::models::interruption::compare_interruption_summaries;
use crate::models::{EventType, InterruptionItem, InterruptionSummaries, InterruptionSummary};
use crate::utils::time::local_day_start;

use super::editor::{Editor, EditorState};

struct Inner {
    summaries: InterruptionSummaries,
    editor: Editor<InterruptionItem>,
}

/// Interruption list and editor state. Summaries stay bucketed into
/// unresolved and resolved, the way the backend returns them; triage order
/// is priority descending with id as the tie break.
#[derive(Clone)]
pub struct InterruptionStore {
    inner: Arc<Mutex<Inner>>,
    gateway: Arc<dyn InterruptionGateway>,
}

impl InterruptionStore {
    pub fn new(gateway: Arc<dyn InterruptionGateway>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                summaries: InterruptionSummaries::default(),
                editor: Editor::new(),
            })),
            gateway,
        }
    }

    /// Replaces both buckets wholesale with the backend's lists for today.
    pub async fn load_summaries(&self) {
        let day_start = local_day_start(Local::now());
        let summaries = self.gateway.summaries(day_start).await;
        self.inner.lock().await.summaries = summaries;
    }

    /// Unresolved items whose name contains `search` (case-insensitive; an
    /// empty search matches everything), in triage order.
    pub async fn filtered_summaries(&self, search: &str) -> Vec<InterruptionSummary> {
        let needle = search.to_lowercase();
        let inner = self.inner.lock().await;
        let mut matches: Vec<InterruptionSummary> = inner
            .summaries
            .unresolved
            .iter()
            .filter(|s| needle.is_empty() || s.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        matches.sort_by(compare_interruption_summaries);
        matches
    }

    pub async fn resolved_summaries(&self) -> Vec<InterruptionSummary> {
        self.inner.lock().await.summaries.resolved.clone()
    }

    /// Cross-references the event store's active work item against the
    /// unresolved list. `None` when nothing is active, when the active item
    /// belongs to the other domain, or when the reported id is not in the
    /// loaded list (stale cache / load race).
    pub async fn active_summary(
        &self,
        active: Option<(EventType, i64)>,
    ) -> Option<InterruptionSummary> {
        let (event_type, id) = active?;
        if event_type != EventType::Interruption {
            return None;
        }
        self.inner
            .lock()
            .await
            .summaries
            .unresolved
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    /// Opens the editor on a blank draft, closing any current editor first.
    pub async fn start_item_create(&self) {
        self.inner
            .lock()
            .await
            .editor
            .request_open(InterruptionItem::draft());
    }

    /// Fetches the full item and opens the editor on it. False when the
    /// backend does not know the id.
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

    /// Promotes a pending editor open; call after observing the close.
    pub async fn finish_editor_transition(&self) {
        self.inner.lock().await.editor.settle();
    }

    pub async fn stop_item_edit(&self) {
        self.inner.lock().await.editor.close();
    }

    pub async fn editing_item(&self) -> Option<InterruptionItem> {
        self.inner.lock().await.editor.item().cloned()
    }

    pub async fn editor_state(&self) -> EditorState<InterruptionItem> {
        self.inner.lock().await.editor.state().clone()
    }

    /// Persists a draft. On success the summary joins the unresolved bucket
    /// and the editor moves onto the persisted copy (which now has a real id).
    pub async fn create_item(&self, item: InterruptionItem) -> bool {
        match self.gateway.create(&item).await {
            Some(created) => {
                let mut inner = self.inner.lock().await;
                inner.summaries.unresolved.push(created.summary());
                inner.editor.request_open(created);
                true
            }
            None => false,
        }
    }

    /// Saves an edited item. The list entry is refreshed in place; the open
    /// editor is replaced only when it is showing the same id, so a stale
    /// late response cannot clobber an unrelated editor.
    pub async fn update_item(&self, item: InterruptionItem) -> bool {
        match self.gateway.update(&item).await {
            Some(updated) => {
                let mut guard = self.inner.lock().await;
                let inner = &mut *guard;
                for summary in inner
                    .summaries
                    .unresolved
                    .iter_mut()
                    .chain(inner.summaries.resolved.iter_mut())
                {
                    if summary.id == updated.id {
                        summary.name = updated.name.clone();
                        summary.priority = updated.priority;
                    }
                }
                if inner.editor.item().map(|i| i.id) == Some(updated.id) {
                    inner.editor.replace(updated);
                }
                true
            }
            None => false,
        }
    }

    /// Removes the item from whichever bucket holds it and closes the editor
    /// if that item was the one being edited.
    pub async fn delete_item(&self, id: i64) -> bool {
        if !self.gateway.delete(id).await {
            return false;
        }
        let mut inner = self.inner.lock().await;
        inner.summaries.unresolved.retain(|s| s.id != id);
        inner.summaries.resolved.retain(|s| s.id != id);
        if inner.editor.item().map(|i| i.id) == Some(id) {
            inner.editor.close();
        }
        true
    }

    /// Marks the item resolved: a one-way move from the unresolved to the
    /// resolved bucket.
    pub async fn resolve_item(&self, item: InterruptionItem) -> bool {
        if !self.gateway.resolve(&item).await {
            return false;
        }
        let mut inner = self.inner.lock().await;
        if let Some(index) = inner
            .summaries
            .unresolved
            .iter()
            .position(|s| s.id == item.id)
        {
            let summary = inner.summaries.unresolved.remove(index);
            inner.summaries.resolved.push(summary);
        }
        if inner.editor.item().map(|i| i.id) == Some(item.id) {
            inner.editor.close();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::MockInterruptionGateway;
    use crate::models::Priority;

    fn summary(id: i64, name: &str, priority: Priority) -> InterruptionSummary {
        InterruptionSummary {
            id,
            name: name.into(),
            priority,
            progress: 0.0,
        }
    }

    fn item(id: i64, name: &str) -> InterruptionItem {
        InterruptionItem {
            id,
            name: name.into(),
            description: String::new(),
            priority: Priority::Medium,
            creation_time: None,
            modified_time: None,
            resolved_time: None,
        }
    }

    fn seeded_store() -> (InterruptionStore, Arc<MockInterruptionGateway>) {
        let gateway = Arc::new(MockInterruptionGateway::new(InterruptionSummaries {
            unresolved: vec![
                summary(1, "build server down", Priority::Low),
                summary(2, "prod incident", Priority::High),
                summary(3, "review request", Priority::Medium),
                summary(4, "broken printer", Priority::Low),
            ],
            resolved: vec![summary(9, "old incident", Priority::High)],
        }));
        (InterruptionStore::new(gateway.clone()), gateway)
    }

    #[tokio::test]
    async fn empty_search_returns_everything_in_triage_order() {
        let (store, _) = seeded_store();
        store.load_summaries().await;

        let order: Vec<i64> = store
            .filtered_summaries("")
            .await
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(order, vec![2, 3, 1, 4]);
    }

    #[tokio::test]
    async fn search_is_a_case_insensitive_subset() {
        let (store, _) = seeded_store();
        store.load_summaries().await;

        let all = store.filtered_summaries("").await;
        let filtered = store.filtered_summaries("PROD").await;
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);
        assert!(filtered.iter().all(|s| all.contains(s)));

        assert!(store.filtered_summaries("no such name").await.is_empty());
    }

    #[tokio::test]
    async fn active_summary_matches_domain_and_id() {
        let (store, _) = seeded_store();
        store.load_summaries().await;

        let active = store
            .active_summary(Some((EventType::Interruption, 2)))
            .await;
        assert_eq!(active.map(|s| s.id), Some(2));

        assert!(store.active_summary(None).await.is_none());
        assert!(store
            .active_summary(Some((EventType::Task, 2)))
            .await
            .is_none());
        // Active id missing from the loaded list: represented, not a panic.
        assert!(store
            .active_summary(Some((EventType::Interruption, 77)))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn create_appends_summary_and_opens_editor_on_persisted_copy() {
        let (store, _) = seeded_store();
        store.load_summaries().await;

        assert!(store.create_item(InterruptionItem::draft()).await);
        store.finish_editor_transition().await;

        let editing = store.editing_item().await.unwrap();
        assert!(editing.id > 0);
        assert_eq!(store.filtered_summaries("").await.len(), 5);
    }

    #[tokio::test]
    async fn update_only_replaces_a_matching_editor() {
        let (store, gateway) = seeded_store();
        store.load_summaries().await;
        gateway.insert_item(item(2, "prod incident"));

        assert!(store.start_item_edit(2).await);
        store.finish_editor_transition().await;

        // A save for a different item must not clobber the open editor.
        let mut other = item(3, "review request");
        other.name = "renamed review".into();
        assert!(store.update_item(other).await);
        assert_eq!(store.editing_item().await.unwrap().id, 2);

        let mut edited = item(2, "prod incident");
        edited.name = "contained incident".into();
        assert!(store.update_item(edited).await);
        assert_eq!(store.editing_item().await.unwrap().name, "contained incident");

        let names: Vec<String> = store
            .filtered_summaries("")
            .await
            .iter()
            .map(|s| s.name.clone())
            .collect();
        assert!(names.contains(&"contained incident".to_string()));
        assert!(names.contains(&"renamed review".to_string()));
    }

    #[tokio::test]
    async fn delete_clears_only_the_matching_editor() {
        let (store, gateway) = seeded_store();
        store.load_summaries().await;
        gateway.insert_item(item(3, "review request"));

        assert!(store.start_item_edit(3).await);
        store.finish_editor_transition().await;

        assert!(store.delete_item(1).await);
        assert!(store.editing_item().await.is_some());

        assert!(store.delete_item(3).await);
        assert!(store.editing_item().await.is_none());
        let order: Vec<i64> = store
            .filtered_summaries("")
            .await
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(order, vec![2, 4]);
    }

    #[tokio::test]
    async fn failed_mutations_leave_the_store_untouched() {
        let (store, gateway) = seeded_store();
        store.load_summaries().await;
        gateway.set_fail_mutations(true);

        assert!(!store.create_item(InterruptionItem::draft()).await);
        assert!(!store.update_item(item(2, "prod incident")).await);
        assert!(!store.delete_item(2).await);
        assert!(!store.resolve_item(item(2, "prod incident")).await);

        assert_eq!(store.filtered_summaries("").await.len(), 4);
        assert_eq!(store.resolved_summaries().await.len(), 1);
    }

    #[tokio::test]
    async fn resolve_moves_the_summary_into_the_resolved_bucket() {
        let (store, _) = seeded_store();
        store.load_summaries().await;

        assert!(store.resolve_item(item(2, "prod incident")).await);
        let unresolved: Vec<i64> = store
            .filtered_summaries("")
            .await
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(unresolved, vec![3, 1, 4]);
        assert!(store
            .resolved_summaries()
            .await
            .iter()
            .any(|s| s.id == 2));
    }

    #[tokio::test]
    async fn editing_a_missing_item_reports_failure() {
        let (store, _) = seeded_store();
        assert!(!store.start_item_edit(42).await);
        assert!(store.editing_item().await.is_none());
    }
}
