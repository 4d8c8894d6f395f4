use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::interruption::UNSAVED_ITEM_ID;

/// List-view projection of a task item. Tasks carry an effort estimate where
/// interruptions carry a priority.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub id: i64,
    pub name: String,
    pub effort: u32,
    pub progress: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistEntry {
    pub description: String,
    pub is_completed: bool,
}

/// Full editable task record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub effort: u32,
    pub checklist: Vec<ChecklistEntry>,
    pub creation_time: Option<DateTime<Utc>>,
    pub modified_time: Option<DateTime<Utc>>,
}

impl TaskItem {
    /// A blank unpersisted item, as handed to the create editor.
    pub fn draft() -> Self {
        Self {
            id: UNSAVED_ITEM_ID,
            name: String::new(),
            description: String::new(),
            effort: 1,
            checklist: Vec::new(),
            creation_time: None,
            modified_time: None,
        }
    }

    pub fn summary(&self) -> TaskSummary {
        let completed = self.checklist.iter().filter(|e| e.is_completed).count();
        let progress = if self.checklist.is_empty() {
            0.0
        } else {
            completed as f64 / self.checklist.len() as f64 * 100.0
        };
        TaskSummary {
            id: self.id,
            name: self.name.clone(),
            effort: self.effort,
            progress,
        }
    }
}

/// Tasks keep queue order: id ascending, regardless of effort. Deliberately
/// different from the interruption comparator.
pub fn compare_task_summaries(a: &TaskSummary, b: &TaskSummary) -> std::cmp::Ordering {
    a.id.cmp(&b.id)
}
