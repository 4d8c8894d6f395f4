pub mod event;
pub mod interruption;
pub mod task;

pub use event::{EventHistory, EventTimeSummary, EventType, OngoingEventTimeSummary};
pub use interruption::{
    InterruptionItem, InterruptionSummaries, InterruptionSummary, Priority, UNSAVED_ITEM_ID,
};
pub use task::{ChecklistEntry, TaskItem, TaskSummary};
