use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The mutually-exclusive activity states. Exactly one is open at any time,
/// identified by `unconcluded_since_start.event_type`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    Idling,
    Break,
    Interruption,
    Task,
}

impl Default for EventType {
    fn default() -> Self {
        EventType::Idling
    }
}

impl EventType {
    /// Interruption and task time both count as working; idling and breaks
    /// do not.
    pub fn is_working(self) -> bool {
        matches!(self, EventType::Interruption | EventType::Task)
    }
}

/// Marker for a single interval, usually the currently open one: which
/// activity it is, which item it points at, and when it started. Breaks carry
/// the server-assigned target duration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventHistory {
    pub id: i64,
    pub resource_id: i64,
    pub event_type: EventType,
    pub timestamp: DateTime<Utc>,
    pub target_duration_ms: Option<u64>,
}

impl EventHistory {
    pub fn open_at(event_type: EventType, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: -1,
            resource_id: -1,
            event_type,
            timestamp,
            target_duration_ms: None,
        }
    }

    /// Milliseconds since this interval opened, clamped at zero for clock skew.
    pub fn elapsed_ms_at(&self, now: DateTime<Utc>) -> u64 {
        (now - self.timestamp).num_milliseconds().max(0) as u64
    }
}

/// Aggregate of concluded (closed) intervals within one accounting window,
/// bucketed into working and not-working time.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventTimeSummary {
    pub working_ms: u64,
    pub not_working_ms: u64,
}

/// The full snapshot the backend reports and the event store holds.
///
/// Two independent accounting windows share the snapshot: the `since_start`
/// pair resets at the calendar-day boundary, the `since_last_break_prompt`
/// pair resets whenever a break starts or is skipped. They are never derived
/// from one another.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OngoingEventTimeSummary {
    pub concluded_since_start: EventTimeSummary,
    pub concluded_since_last_break_prompt: EventTimeSummary,
    pub unconcluded_since_start: EventHistory,
    pub unconcluded_since_last_break_prompt: EventHistory,
}

impl OngoingEventTimeSummary {
    /// The fail-soft default: no concluded time, idling since `now`. Returned
    /// by the HTTP collaborator when the fetch fails, so callers always hold a
    /// well-formed snapshot.
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            concluded_since_start: EventTimeSummary::default(),
            concluded_since_last_break_prompt: EventTimeSummary::default(),
            unconcluded_since_start: EventHistory::open_at(EventType::Idling, now),
            unconcluded_since_last_break_prompt: EventHistory::open_at(EventType::Idling, now),
        }
    }

    pub fn current_type(&self) -> EventType {
        self.unconcluded_since_start.event_type
    }

    pub fn is_working(&self) -> bool {
        self.current_type().is_working()
    }

    pub fn is_breaking(&self) -> bool {
        self.current_type() == EventType::Break
    }

    pub fn is_not_working(&self) -> bool {
        self.is_breaking() || self.current_type() == EventType::Idling
    }

    /// Day-level working total: concluded working time plus the open
    /// interval's elapsed time, but only when the open interval is itself a
    /// working one. The open interval is never credited to both buckets.
    pub fn working_duration_at(&self, now: DateTime<Utc>) -> u64 {
        let ongoing = if self.is_working() {
            self.unconcluded_since_start.elapsed_ms_at(now)
        } else {
            0
        };
        self.concluded_since_start.working_ms.saturating_add(ongoing)
    }

    /// Day-level not-working total, the counterpart of `working_duration_at`.
    pub fn non_working_duration_at(&self, now: DateTime<Utc>) -> u64 {
        let ongoing = if self.is_working() {
            0
        } else {
            self.unconcluded_since_start.elapsed_ms_at(now)
        };
        self.concluded_since_start
            .not_working_ms
            .saturating_add(ongoing)
    }

    /// Time left of the current break's target duration, zero when not on a
    /// break (or once the target has been consumed).
    pub fn remaining_break_at(&self, now: DateTime<Utc>) -> u64 {
        if !self.is_breaking() {
            return 0;
        }
        let target = self.unconcluded_since_start.target_duration_ms.unwrap_or(0);
        target.saturating_sub(self.unconcluded_since_start.elapsed_ms_at(now))
    }

    /// The break-prompt trigger rule: working time accumulated since the last
    /// break prompt (concluded plus the open working interval) has reached
    /// `work_limit_ms`. Always false while not working.
    pub fn scheduled_break_due_at(&self, now: DateTime<Utc>, work_limit_ms: u64) -> bool {
        if !self.is_working() {
            return false;
        }
        let elapsed = self.unconcluded_since_last_break_prompt.elapsed_ms_at(now);
        self.concluded_since_last_break_prompt
            .working_ms
            .saturating_add(elapsed)
            >= work_limit_ms
    }
}
