pub mod dialog;
pub mod editor;
pub mod event;
pub mod interruption;
pub mod task;

pub use dialog::{DialogConfig, DialogStore};
pub use editor::{Editor, EditorState};
pub use event::{EventStore, DEFAULT_BREAK_DURATION_MS, DEFAULT_WORK_DURATION_LIMIT_MS};
pub use interruption::InterruptionStore;
pub use task::TaskStore;
