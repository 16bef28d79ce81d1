//! Countdown state machine.

use crate::ids::EventId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const MS_PER_DAY: i64 = 86_400_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

/// A domain object with a deadline after which it should be deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimedEntity {
    pub id: EventId,
    pub finish_at: DateTime<Utc>,
}

impl TimedEntity {
    pub fn new(id: impl Into<EventId>, finish_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            finish_at,
        }
    }
}

/// Remaining time broken into display components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeRemaining {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeRemaining {
    /// Decompose a millisecond span. Non-positive spans are all zeros.
    pub fn from_millis(ms: i64) -> Self {
        if ms <= 0 {
            return Self::default();
        }
        Self {
            days: (ms / MS_PER_DAY) as u64,
            hours: ((ms / MS_PER_HOUR) % 24) as u64,
            minutes: ((ms / MS_PER_MINUTE) % 60) as u64,
            seconds: ((ms / MS_PER_SECOND) % 60) as u64,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for TimeRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} days {} hours {} minutes {} seconds",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Observable countdown state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CountdownState {
    Counting(TimeRemaining),
    /// Terminal.
    Expired,
}

impl CountdownState {
    pub fn is_expired(&self) -> bool {
        matches!(self, CountdownState::Expired)
    }

    /// Remaining time; all zeros once expired.
    pub fn remaining(&self) -> TimeRemaining {
        match self {
            CountdownState::Counting(remaining) => *remaining,
            CountdownState::Expired => TimeRemaining::default(),
        }
    }
}

impl fmt::Display for CountdownState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountdownState::Counting(remaining) => write!(f, "{remaining}"),
            CountdownState::Expired => write!(f, "Time's Up"),
        }
    }
}

/// Intent to delete an expired entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionRequest {
    pub entity_id: EventId,
}

/// What a single tick observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickOutcome {
    pub state: CountdownState,
    /// Present only on the tick that crossed the deadline.
    pub deletion: Option<DeletionRequest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Counting,
    Expired,
}

/// Deadline tracker for one timed entity.
///
/// Holds the entity id, not the entity. The deletion request is
/// edge-triggered: it is emitted on the tick that moves the controller to
/// `Expired` and never again for this instance, however many times the
/// expired state is observed afterwards.
#[derive(Debug, Clone)]
pub struct CountdownController {
    entity_id: EventId,
    finish_at: DateTime<Utc>,
    phase: Phase,
    deletion_emitted: bool,
}

impl CountdownController {
    pub fn new(entity: &TimedEntity) -> Self {
        Self {
            entity_id: entity.id.clone(),
            finish_at: entity.finish_at,
            phase: Phase::Counting,
            deletion_emitted: false,
        }
    }

    /// Advance the state machine to `now`.
    pub fn tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        if self.phase == Phase::Expired {
            return TickOutcome {
                state: CountdownState::Expired,
                deletion: None,
            };
        }

        let remaining_ms = self.remaining_ms(now);
        if remaining_ms > 0 {
            return TickOutcome {
                state: CountdownState::Counting(TimeRemaining::from_millis(remaining_ms)),
                deletion: None,
            };
        }

        self.phase = Phase::Expired;
        let deletion = if self.deletion_emitted {
            None
        } else {
            self.deletion_emitted = true;
            tracing::info!(entity_id = %self.entity_id, "countdown expired");
            Some(DeletionRequest {
                entity_id: self.entity_id.clone(),
            })
        };

        TickOutcome {
            state: CountdownState::Expired,
            deletion,
        }
    }

    /// State at `now`, without advancing the machine or emitting anything.
    pub fn observe(&self, now: DateTime<Utc>) -> CountdownState {
        if self.phase == Phase::Expired {
            return CountdownState::Expired;
        }
        match self.remaining_ms(now) {
            ms if ms > 0 => CountdownState::Counting(TimeRemaining::from_millis(ms)),
            _ => CountdownState::Expired,
        }
    }

    pub fn entity_id(&self) -> &EventId {
        &self.entity_id
    }

    pub fn finish_at(&self) -> DateTime<Utc> {
        self.finish_at
    }

    pub fn is_expired(&self) -> bool {
        self.phase == Phase::Expired
    }

    pub fn deletion_emitted(&self) -> bool {
        self.deletion_emitted
    }

    fn remaining_ms(&self, now: DateTime<Utc>) -> i64 {
        (self.finish_at - now).num_milliseconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_time_remaining_decomposition() {
        let ms = 2 * MS_PER_DAY + 3 * MS_PER_HOUR + 4 * MS_PER_MINUTE + 5 * MS_PER_SECOND + 999;
        assert_eq!(
            TimeRemaining::from_millis(ms),
            TimeRemaining {
                days: 2,
                hours: 3,
                minutes: 4,
                seconds: 5,
            }
        );
    }

    #[test]
    fn test_time_remaining_never_negative() {
        assert!(TimeRemaining::from_millis(-1_000).is_zero());
        assert!(TimeRemaining::from_millis(0).is_zero());
    }

    #[test]
    fn test_counting_one_day_out() {
        let now = Utc::now();
        let mut controller =
            CountdownController::new(&TimedEntity::new("test-event-id", now + Duration::days(1)));

        let outcome = controller.tick(now);
        assert_eq!(
            outcome.state,
            CountdownState::Counting(TimeRemaining {
                days: 1,
                hours: 0,
                minutes: 0,
                seconds: 0,
            })
        );
        assert!(outcome.deletion.is_none());
        assert!(!controller.is_expired());
    }

    #[test]
    fn test_past_deadline_expires_immediately_and_deletes_once() {
        let now = Utc::now();
        let mut controller =
            CountdownController::new(&TimedEntity::new("test-event-id", now - Duration::seconds(1)));

        let first = controller.tick(now);
        assert_eq!(first.state, CountdownState::Expired);
        assert_eq!(first.state.remaining(), TimeRemaining::default());
        assert_eq!(
            first.deletion,
            Some(DeletionRequest {
                entity_id: EventId::new("test-event-id"),
            })
        );

        let emitted = (0..10)
            .map(|i| controller.tick(now + Duration::seconds(i)))
            .filter(|o| o.deletion.is_some())
            .count();
        assert_eq!(emitted, 0);
        assert!(controller.deletion_emitted());
    }

    #[test]
    fn test_crossing_zero_fires_on_that_tick() {
        let start = Utc::now();
        let mut controller =
            CountdownController::new(&TimedEntity::new("e", start + Duration::seconds(2)));

        assert!(controller.tick(start).deletion.is_none());
        assert!(controller.tick(start + Duration::seconds(1)).deletion.is_none());
        assert!(controller.tick(start + Duration::seconds(2)).deletion.is_some());
        assert!(controller.tick(start + Duration::seconds(3)).deletion.is_none());
    }

    #[test]
    fn test_expired_has_no_outgoing_transitions() {
        let start = Utc::now();
        let mut controller = CountdownController::new(&TimedEntity::new("e", start));
        controller.tick(start);

        // Even if the clock goes backwards, the controller stays expired.
        let outcome = controller.tick(start - Duration::hours(1));
        assert_eq!(outcome.state, CountdownState::Expired);
        assert!(outcome.deletion.is_none());
    }

    #[test]
    fn test_observe_does_not_emit() {
        let now = Utc::now();
        let mut controller = CountdownController::new(&TimedEntity::new("e", now - Duration::seconds(1)));

        assert_eq!(controller.observe(now), CountdownState::Expired);
        assert!(!controller.deletion_emitted());
        assert!(controller.tick(now).deletion.is_some());
    }

    #[test]
    fn test_expired_display() {
        assert_eq!(CountdownState::Expired.to_string(), "Time's Up");
    }
}
