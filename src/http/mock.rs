//! Mock gateways for unit/integration testing. Substitution is explicit:
//! stores take their gateway at construction, so tests hand them one of
//! these instead of an HTTP-backed service.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};

use crate::models::{
    InterruptionItem, InterruptionSummaries, OngoingEventTimeSummary, TaskItem, TaskSummary,
};

use super::{EventGateway, InterruptionGateway, TaskGateway};

/// Scripted event gateway: serves a swappable snapshot and counts every
/// endpoint hit, so tests can assert the store re-fetched after a
/// successful transition.
pub struct MockEventGateway {
    snapshot: Mutex<OngoingEventTimeSummary>,
    pub summary_calls: AtomicUsize,
    pub idling_calls: AtomicUsize,
    pub interruption_calls: AtomicUsize,
    pub task_calls: AtomicUsize,
    pub break_calls: AtomicUsize,
    pub skip_calls: AtomicUsize,
    pub last_break_target: Mutex<Option<u64>>,

    /// When set, every transition endpoint reports rejection.
    pub fail_transitions: AtomicBool,
}

impl MockEventGateway {
    pub fn new(snapshot: OngoingEventTimeSummary) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
            summary_calls: AtomicUsize::new(0),
            idling_calls: AtomicUsize::new(0),
            interruption_calls: AtomicUsize::new(0),
            task_calls: AtomicUsize::new(0),
            break_calls: AtomicUsize::new(0),
            skip_calls: AtomicUsize::new(0),
            last_break_target: Mutex::new(None),
            fail_transitions: AtomicBool::new(false),
        }
    }

    pub fn idle() -> Self {
        Self::new(OngoingEventTimeSummary::empty(Utc::now()))
    }

    /// Replaces the snapshot the next `ongoing_summary` call will serve.
    pub fn set_snapshot(&self, snapshot: OngoingEventTimeSummary) {
        *self.snapshot.lock().unwrap() = snapshot;
    }

    pub fn set_fail_transitions(&self, fail: bool) {
        self.fail_transitions.store(fail, Ordering::SeqCst);
    }

    fn transition(&self, counter: &AtomicUsize) -> bool {
        counter.fetch_add(1, Ordering::SeqCst);
        !self.fail_transitions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventGateway for MockEventGateway {
    async fn ongoing_summary(&self, _day_start: DateTime<Local>) -> OngoingEventTimeSummary {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        self.snapshot.lock().unwrap().clone()
    }

    async fn start_idling(&self) -> bool {
        self.transition(&self.idling_calls)
    }

    async fn start_interruption(&self, _id: i64) -> bool {
        self.transition(&self.interruption_calls)
    }

    async fn start_task(&self, _id: i64) -> bool {
        self.transition(&self.task_calls)
    }

    async fn start_break(&self, target_duration_ms: u64) -> bool {
        *self.last_break_target.lock().unwrap() = Some(target_duration_ms);
        self.transition(&self.break_calls)
    }

    async fn skip_break(&self) -> bool {
        self.transition(&self.skip_calls)
    }
}

/// In-memory interruption backend: items live in a map, creates assign
/// ascending ids, and a single flag fails every mutation.
pub struct MockInterruptionGateway {
    summaries: Mutex<InterruptionSummaries>,
    items: Mutex<HashMap<i64, InterruptionItem>>,
    next_id: AtomicI64,
    pub summary_calls: AtomicUsize,
    pub fail_mutations: AtomicBool,
}

impl MockInterruptionGateway {
    pub fn new(summaries: InterruptionSummaries) -> Self {
        Self {
            summaries: Mutex::new(summaries),
            items: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            summary_calls: AtomicUsize::new(0),
            fail_mutations: AtomicBool::new(false),
        }
    }

    pub fn empty() -> Self {
        Self::new(InterruptionSummaries::default())
    }

    pub fn insert_item(&self, item: InterruptionItem) {
        self.items.lock().unwrap().insert(item.id, item);
    }

    pub fn set_fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    fn failing(&self) -> bool {
        self.fail_mutations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InterruptionGateway for MockInterruptionGateway {
    async fn summaries(&self, _day_start: DateTime<Local>) -> InterruptionSummaries {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        self.summaries.lock().unwrap().clone()
    }

    async fn item(&self, id: i64) -> Option<InterruptionItem> {
        self.items.lock().unwrap().get(&id).cloned()
    }

    async fn create(&self, item: &InterruptionItem) -> Option<InterruptionItem> {
        if self.failing() {
            return None;
        }
        let mut created = item.clone();
        created.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        created.creation_time = Some(Utc::now());
        self.items.lock().unwrap().insert(created.id, created.clone());
        Some(created)
    }

    async fn update(&self, item: &InterruptionItem) -> Option<InterruptionItem> {
        if self.failing() {
            return None;
        }
        let mut updated = item.clone();
        updated.modified_time = Some(Utc::now());
        self.items.lock().unwrap().insert(updated.id, updated.clone());
        Some(updated)
    }

    async fn delete(&self, id: i64) -> bool {
        if self.failing() {
            return false;
        }
        self.items.lock().unwrap().remove(&id);
        true
    }

    async fn resolve(&self, _item: &InterruptionItem) -> bool {
        !self.failing()
    }
}

/// In-memory task backend, same shape as the interruption mock minus the
/// resolve endpoint.
pub struct MockTaskGateway {
    summaries: Mutex<Vec<TaskSummary>>,
    items: Mutex<HashMap<i64, TaskItem>>,
    next_id: AtomicI64,
    pub summary_calls: AtomicUsize,
    pub fail_mutations: AtomicBool,
}

impl MockTaskGateway {
    pub fn new(summaries: Vec<TaskSummary>) -> Self {
        Self {
            summaries: Mutex::new(summaries),
            items: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            summary_calls: AtomicUsize::new(0),
            fail_mutations: AtomicBool::new(false),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn insert_item(&self, item: TaskItem) {
        self.items.lock().unwrap().insert(item.id, item);
    }

    pub fn set_fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    fn failing(&self) -> bool {
        self.fail_mutations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskGateway for MockTaskGateway {
    async fn summaries(&self, _day_start: DateTime<Local>) -> Vec<TaskSummary> {
        self.summary_calls.fetch_add(1, Ordering::SeqCst);
        self.summaries.lock().unwrap().clone()
    }

    async fn item(&self, id: i64) -> Option<TaskItem> {
        self.items.lock().unwrap().get(&id).cloned()
    }

    async fn create(&self, item: &TaskItem) -> Option<TaskItem> {
        if self.failing() {
            return None;
        }
        let mut created = item.clone();
        created.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        created.creation_time = Some(Utc::now());
        self.items.lock().unwrap().insert(created.id, created.clone());
        Some(created)
    }

    async fn update(&self, item: &TaskItem) -> Option<TaskItem> {
        if self.failing() {
            return None;
        }
        let mut updated = item.clone();
        updated.modified_time = Some(Utc::now());
        self.items.lock().unwrap().insert(updated.id, updated.clone());
        Some(updated)
    }

    async fn delete(&self, id: i64) -> bool {
        if self.failing() {
            return false;
        }
        self.items.lock().unwrap().remove(&id);
        true
    }
}
