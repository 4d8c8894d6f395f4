pub mod http;
pub mod models;
pub mod settings;
pub mod stores;
pub mod utils;

use std::sync::Arc;

use anyhow::Result;

use http::{ApiClient, EventHttpService, InterruptionHttpService, TaskHttpService};
use settings::UserSettings;
use stores::{DialogStore, EventStore, InterruptionStore, TaskStore};

pub use models::{
    EventHistory, EventTimeSummary, EventType, InterruptionItem, InterruptionSummaries,
    InterruptionSummary, OngoingEventTimeSummary, Priority, TaskItem, TaskSummary,
};

/// The store handles a front end works against.
pub struct Stores {
    pub events: EventStore,
    pub interruptions: InterruptionStore,
    pub tasks: TaskStore,
    pub dialogs: DialogStore,
}

/// Wires the HTTP services and stores from user settings. Each store takes
/// its collaborator explicitly; tests construct the same stores over the
/// mock gateways instead.
pub fn build_stores(settings: &UserSettings) -> Result<Stores> {
    let client = ApiClient::new(settings.api_base_url.clone())?;

    let events = EventStore::with_durations(
        Arc::new(EventHttpService::new(client.clone())),
        settings.work_duration_limit_ms,
        settings.break_duration_ms,
    );
    let interruptions = InterruptionStore::new(Arc::new(InterruptionHttpService::new(client.clone())));
    let tasks = TaskStore::new(Arc::new(TaskHttpService::new(client)));

    Ok(Stores {
        events,
        interruptions,
        tasks,
        dialogs: DialogStore::new(),
    })
}
