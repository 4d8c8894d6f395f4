use std::sync::Arc;

use chrono::{Local, Utc};
use log::info;
use tokio::sync::Mutex;

use crate::http::EventGateway;
use crate::models::{EventType, OngoingEventTimeSummary};
use crate::utils::time::{local_day_start, MS_PER_MINUTE};

pub const DEFAULT_WORK_DURATION_LIMIT_MS: u64 = 50 * MS_PER_MINUTE;
pub const DEFAULT_BREAK_DURATION_MS: u64 = 10 * MS_PER_MINUTE;

/// Holds the latest server snapshot and derives every live predicate and
/// duration from it plus the wall clock. The backend is the single source of
/// truth for the current activity; this store never flips state locally, it
/// requests a transition and re-fetches the snapshot on success.
#[derive(Clone)]
pub struct EventStore {
    summary: Arc<Mutex<Option<OngoingEventTimeSummary>>>,
    gateway: Arc<dyn EventGateway>,
    work_duration_limit_ms: u64,
    break_duration_ms: u64,
}

impl EventStore {
    pub fn new(gateway: Arc<dyn EventGateway>) -> Self {
        Self::with_durations(
            gateway,
            DEFAULT_WORK_DURATION_LIMIT_MS,
            DEFAULT_BREAK_DURATION_MS,
        )
    }

    pub fn with_durations(
        gateway: Arc<dyn EventGateway>,
        work_duration_limit_ms: u64,
        break_duration_ms: u64,
    ) -> Self {
        Self {
            summary: Arc::new(Mutex::new(None)),
            gateway,
            work_duration_limit_ms,
            break_duration_ms,
        }
    }

    pub fn work_duration_limit_ms(&self) -> u64 {
        self.work_duration_limit_ms
    }

    pub fn break_duration_ms(&self) -> u64 {
        self.break_duration_ms
    }

    /// Fetches the snapshot anchored at local midnight and replaces the held
    /// one unconditionally; the collaborator already fails soft.
    pub async fn load_ongoing_summary(&self) {
        let day_start = local_day_start(Local::now());
        let snapshot = self.gateway.ongoing_summary(day_start).await;
        *self.summary.lock().await = Some(snapshot);
    }

    pub async fn ongoing_summary(&self) -> Option<OngoingEventTimeSummary> {
        self.summary.lock().await.clone()
    }

    pub async fn start_idling(&self) -> bool {
        let accepted = self.gateway.start_idling().await;
        self.resync_if(accepted, "idling").await
    }

    pub async fn start_interruption(&self, id: i64) -> bool {
        let accepted = self.gateway.start_interruption(id).await;
        self.resync_if(accepted, "interruption").await
    }

    pub async fn start_task(&self, id: i64) -> bool {
        let accepted = self.gateway.start_task(id).await;
        self.resync_if(accepted, "task").await
    }

    /// The configured break length travels with the request so the server
    /// can stamp `target_duration_ms` on the new interval.
    pub async fn start_break(&self) -> bool {
        let accepted = self.gateway.start_break(self.break_duration_ms).await;
        self.resync_if(accepted, "break").await
    }

    pub async fn skip_break(&self) -> bool {
        let accepted = self.gateway.skip_break().await;
        self.resync_if(accepted, "skip break").await
    }

    async fn resync_if(&self, accepted: bool, transition: &str) -> bool {
        if accepted {
            info!("transition to {transition} accepted, reloading summary");
            self.load_ongoing_summary().await;
        }
        accepted
    }

    pub async fn is_working(&self) -> bool {
        self.summary
            .lock()
            .await
            .as_ref()
            .is_some_and(|s| s.is_working())
    }

    pub async fn is_not_working(&self) -> bool {
        self.summary
            .lock()
            .await
            .as_ref()
            .is_some_and(|s| s.is_not_working())
    }

    pub async fn is_breaking(&self) -> bool {
        self.summary
            .lock()
            .await
            .as_ref()
            .is_some_and(|s| s.is_breaking())
    }

    /// True when the open interval is a working one of the given type
    /// pointing at the given item. False with no snapshot loaded.
    pub async fn is_active_work_item(&self, event_type: EventType, id: i64) -> bool {
        self.summary.lock().await.as_ref().is_some_and(|s| {
            s.is_working()
                && s.current_type() == event_type
                && s.unconcluded_since_start.resource_id == id
        })
    }

    /// The `(type, resource id)` key of the active work item, if any. Item
    /// stores cross-reference this against their unresolved lists.
    pub async fn active_resource(&self) -> Option<(EventType, i64)> {
        self.summary.lock().await.as_ref().and_then(|s| {
            if s.is_working() {
                Some((s.current_type(), s.unconcluded_since_start.resource_id))
            } else {
                None
            }
        })
    }

    pub async fn working_duration(&self) -> u64 {
        self.summary
            .lock()
            .await
            .as_ref()
            .map_or(0, |s| s.working_duration_at(Utc::now()))
    }

    pub async fn non_working_duration(&self) -> u64 {
        self.summary
            .lock()
            .await
            .as_ref()
            .map_or(0, |s| s.non_working_duration_at(Utc::now()))
    }

    pub async fn remaining_break(&self) -> u64 {
        self.summary
            .lock()
            .await
            .as_ref()
            .map_or(0, |s| s.remaining_break_at(Utc::now()))
    }

    pub async fn has_scheduled_break(&self) -> bool {
        self.summary
            .lock()
            .await
            .as_ref()
            .is_some_and(|s| s.scheduled_break_due_at(Utc::now(), self.work_duration_limit_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::MockEventGateway;
    use crate::models::{EventHistory, EventTimeSummary};
    use crate::utils::time::minutes_to_ms;
    use chrono::{DateTime, Duration};
    use std::sync::atomic::Ordering;

    fn snapshot(event_type: EventType, resource_id: i64, open_for_ms: i64) -> OngoingEventTimeSummary {
        let opened = Utc::now() - Duration::milliseconds(open_for_ms);
        let open = |ts: DateTime<Utc>| EventHistory {
            id: 1,
            resource_id,
            event_type,
            timestamp: ts,
            target_duration_ms: None,
        };
        OngoingEventTimeSummary {
            concluded_since_start: EventTimeSummary::default(),
            concluded_since_last_break_prompt: EventTimeSummary::default(),
            unconcluded_since_start: open(opened),
            unconcluded_since_last_break_prompt: open(opened),
        }
    }

    #[tokio::test]
    async fn getters_are_inert_before_the_first_load() {
        let store = EventStore::new(Arc::new(MockEventGateway::idle()));
        assert!(!store.is_working().await);
        assert!(!store.is_not_working().await);
        assert!(!store.is_breaking().await);
        assert!(!store.is_active_work_item(EventType::Task, 1).await);
        assert_eq!(store.working_duration().await, 0);
        assert_eq!(store.non_working_duration().await, 0);
        assert_eq!(store.remaining_break().await, 0);
        assert!(!store.has_scheduled_break().await);
        assert!(store.active_resource().await.is_none());
    }

    #[tokio::test]
    async fn load_replaces_the_snapshot() {
        let gateway = Arc::new(MockEventGateway::new(snapshot(EventType::Task, 4, 0)));
        let store = EventStore::new(gateway.clone());

        store.load_ongoing_summary().await;
        assert!(store.is_working().await);
        assert_eq!(store.active_resource().await, Some((EventType::Task, 4)));

        gateway.set_snapshot(snapshot(EventType::Idling, -1, 0));
        store.load_ongoing_summary().await;
        assert!(store.is_not_working().await);
        assert_eq!(gateway.summary_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn successful_transition_refetches_the_snapshot() {
        let gateway = Arc::new(MockEventGateway::new(snapshot(EventType::Interruption, 2, 0)));
        let store = EventStore::new(gateway.clone());

        assert!(store.start_interruption(2).await);
        assert_eq!(gateway.interruption_calls.load(Ordering::SeqCst), 1);
        assert_eq!(gateway.summary_calls.load(Ordering::SeqCst), 1);
        assert!(store.is_active_work_item(EventType::Interruption, 2).await);
    }

    #[tokio::test]
    async fn rejected_transition_leaves_state_untouched() {
        let gateway = Arc::new(MockEventGateway::new(snapshot(EventType::Task, 9, 0)));
        let store = EventStore::new(gateway.clone());
        store.load_ongoing_summary().await;

        gateway.set_fail_transitions(true);
        assert!(!store.start_idling().await);
        assert!(!store.start_task(5).await);
        assert!(!store.skip_break().await);

        // Only the initial load hit the summary endpoint.
        assert_eq!(gateway.summary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.active_resource().await, Some((EventType::Task, 9)));
    }

    #[tokio::test]
    async fn start_break_carries_the_configured_duration() {
        let gateway = Arc::new(MockEventGateway::idle());
        let store = EventStore::with_durations(gateway.clone(), minutes_to_ms(50), minutes_to_ms(10));

        assert!(store.start_break().await);
        assert_eq!(
            *gateway.last_break_target.lock().unwrap(),
            Some(minutes_to_ms(10))
        );
    }

    #[tokio::test]
    async fn working_duration_tracks_the_open_interval() {
        let gateway = Arc::new(MockEventGateway::new(snapshot(EventType::Task, 1, 60_000)));
        let store = EventStore::new(gateway);
        store.load_ongoing_summary().await;

        let duration = store.working_duration().await;
        assert!(
            (60_000..60_100).contains(&duration),
            "expected ~60s, got {duration}ms"
        );
        assert_eq!(store.non_working_duration().await, 0);
    }

    #[tokio::test]
    async fn break_prompt_fires_at_the_work_limit() {
        let gateway = Arc::new(MockEventGateway::new(snapshot(
            EventType::Task,
            1,
            minutes_to_ms(50) as i64,
        )));
        let store = EventStore::new(gateway.clone());
        store.load_ongoing_summary().await;
        assert!(store.has_scheduled_break().await);

        gateway.set_snapshot(snapshot(EventType::Task, 1, minutes_to_ms(49) as i64));
        store.load_ongoing_summary().await;
        assert!(!store.has_scheduled_break().await);
    }

    #[tokio::test]
    async fn active_item_requires_matching_type_and_id() {
        let gateway = Arc::new(MockEventGateway::new(snapshot(EventType::Interruption, 3, 0)));
        let store = EventStore::new(gateway);
        store.load_ongoing_summary().await;

        assert!(store.is_active_work_item(EventType::Interruption, 3).await);
        assert!(!store.is_active_work_item(EventType::Interruption, 4).await);
        assert!(!store.is_active_work_item(EventType::Task, 3).await);
    }
}
