use std::sync::{Arc, RwLock};

use serde_json::Value;

/// Description of one modal: which component to mount and the props to hand
/// it. Two configs with identical contents are still distinct dialogs.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogConfig {
    pub component: String,
    pub props: Value,
}

impl DialogConfig {
    pub fn new(component: impl Into<String>, props: Value) -> Arc<Self> {
        Arc::new(Self {
            component: component.into(),
            props,
        })
    }
}

/// Queue of open dialogs in insertion order. Closing removes by pointer
/// identity, not value equality, so several dialogs with the same contents
/// can be queued and closed independently.
pub struct DialogStore {
    queue: RwLock<Vec<Arc<DialogConfig>>>,
}

impl Default for DialogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogStore {
    pub fn new() -> Self {
        Self {
            queue: RwLock::new(Vec::new()),
        }
    }

    pub fn open(&self, config: Arc<DialogConfig>) {
        self.queue.write().unwrap().push(config);
    }

    /// Removes the given dialog instance. Returns false when that instance
    /// is not queued (e.g. already closed).
    pub fn close(&self, config: &Arc<DialogConfig>) -> bool {
        let mut queue = self.queue.write().unwrap();
        match queue.iter().position(|queued| Arc::ptr_eq(queued, config)) {
            Some(index) => {
                queue.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn dialogs(&self) -> Vec<Arc<DialogConfig>> {
        self.queue.read().unwrap().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.read().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dialogs_queue_in_insertion_order() {
        let store = DialogStore::new();
        let first = DialogConfig::new("confirm-delete", json!({ "id": 1 }));
        let second = DialogConfig::new("edit-item", json!({ "id": 2 }));

        store.open(first.clone());
        store.open(second.clone());

        let queued = store.dialogs();
        assert_eq!(queued.len(), 2);
        assert!(Arc::ptr_eq(&queued[0], &first));
        assert!(Arc::ptr_eq(&queued[1], &second));
    }

    #[test]
    fn close_matches_by_identity_not_value() {
        let store = DialogStore::new();
        let first = DialogConfig::new("confirm-delete", json!({ "id": 1 }));
        let twin = DialogConfig::new("confirm-delete", json!({ "id": 1 }));
        assert_eq!(*first, *twin);

        store.open(first.clone());
        store.open(twin.clone());

        assert!(store.close(&twin));
        let queued = store.dialogs();
        assert_eq!(queued.len(), 1);
        assert!(Arc::ptr_eq(&queued[0], &first));
    }

    #[test]
    fn closing_an_unqueued_dialog_reports_false() {
        let store = DialogStore::new();
        let config = DialogConfig::new("confirm-delete", json!({}));
        assert!(!store.close(&config));

        store.open(config.clone());
        assert!(store.close(&config));
        assert!(!store.close(&config));
        assert!(store.is_empty());
    }
}
