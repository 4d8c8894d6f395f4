use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder id for items not yet persisted; the backend assigns a positive
/// id on create.
pub const UNSAVED_ITEM_ID: i64 = -1;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Low
    }
}

/// List-view projection of an interruption item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InterruptionSummary {
    pub id: i64,
    pub name: String,
    pub priority: Priority,
    pub progress: f64,
}

/// The backend always returns both buckets together; resolution is a one-way
/// move from `unresolved` to `resolved`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterruptionSummaries {
    pub unresolved: Vec<InterruptionSummary>,
    pub resolved: Vec<InterruptionSummary>,
}

/// Full editable interruption record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InterruptionItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub priority: Priority,
    pub creation_time: Option<DateTime<Utc>>,
    pub modified_time: Option<DateTime<Utc>>,
    pub resolved_time: Option<DateTime<Utc>>,
}

impl InterruptionItem {
    /// A blank unpersisted item, as handed to the create editor.
    pub fn draft() -> Self {
        Self {
            id: UNSAVED_ITEM_ID,
            name: String::new(),
            description: String::new(),
            priority: Priority::Low,
            creation_time: None,
            modified_time: None,
            resolved_time: None,
        }
    }

    pub fn summary(&self) -> InterruptionSummary {
        InterruptionSummary {
            id: self.id,
            name: self.name.clone(),
            priority: self.priority,
            progress: 0.0,
        }
    }
}

/// Interruption triage order: most urgent first, creation order within the
/// same priority. Deliberately different from the task comparator.
pub fn compare_interruption_summaries(a: &InterruptionSummary, b: &InterruptionSummary) -> std::cmp::Ordering {
    b.priority.cmp(&a.priority).then(a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: i64, priority: Priority) -> InterruptionSummary {
        InterruptionSummary {
            id,
            name: format!("interruption {id}"),
            priority,
            progress: 0.0,
        }
    }

    #[test]
    fn priority_order_is_low_to_high() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
    }

    #[test]
    fn comparator_sorts_priority_desc_then_id_asc() {
        let mut items = vec![
            summary(1, Priority::Low),
            summary(2, Priority::High),
            summary(3, Priority::Medium),
            summary(4, Priority::Low),
        ];
        items.sort_by(compare_interruption_summaries);
        let order: Vec<i64> = items.iter().map(|s| s.id).collect();
        assert_eq!(order, vec![2, 3, 1, 4]);
    }

    #[test]
    fn draft_uses_the_placeholder_id() {
        let draft = InterruptionItem::draft();
        assert_eq!(draft.id, UNSAVED_ITEM_ID);
        assert!(draft.resolved_time.is_none());
    }
}
