//! Tokio driver for a [`CountdownController`].

use super::clock::Clock;
use super::controller::{CountdownController, CountdownState};
use super::deletion::EntityDeletionService;
use crate::error::CommerceError;
use crate::ids::EventId;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::MissedTickBehavior;

/// Timer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownConfig {
    tick_interval: Duration,
}

impl CountdownConfig {
    /// Longest allowed interval; the display never lags by more than a second.
    pub const MAX_TICK_INTERVAL: Duration = Duration::from_millis(1000);

    pub fn new(tick_interval: Duration) -> Result<Self, CommerceError> {
        if tick_interval.is_zero() || tick_interval > Self::MAX_TICK_INTERVAL {
            return Err(CommerceError::InvalidConfig(format!(
                "tick interval must be between 1ms and {}ms, got {}ms",
                Self::MAX_TICK_INTERVAL.as_millis(),
                tick_interval.as_millis()
            )));
        }
        Ok(Self { tick_interval })
    }

    pub fn from_millis(ms: u64) -> Result<Self, CommerceError> {
        Self::new(Duration::from_millis(ms))
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            tick_interval: Self::MAX_TICK_INTERVAL,
        }
    }
}

/// Spawns countdown tasks.
pub struct CountdownTimer;

impl CountdownTimer {
    /// Start ticking `controller` on the current tokio runtime.
    ///
    /// The task publishes every observed state on a watch channel, calls the
    /// deletion service once when the deadline passes, then exits. Deletion
    /// failures are logged and not retried.
    pub fn spawn(
        mut controller: CountdownController,
        clock: Arc<dyn Clock>,
        deletion: Arc<dyn EntityDeletionService>,
        config: CountdownConfig,
    ) -> CountdownHandle {
        let entity_id = controller.entity_id().clone();
        let (tx, rx) = watch::channel(controller.observe(clock.now()));

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(config.tick_interval());
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                let outcome = controller.tick(clock.now());

                tx.send_replace(outcome.state);

                if let Some(request) = outcome.deletion {
                    // Detached so that stopping the timer never cancels a
                    // deletion that has already started.
                    let deletion = Arc::clone(&deletion);
                    let attempt = tokio::spawn(async move {
                        delete_expired(deletion.as_ref(), &request.entity_id).await;
                    });
                    if let Err(e) = attempt.await {
                        tracing::warn!(error = %e, "deletion task failed");
                    }
                }

                if outcome.state.is_expired() {
                    break;
                }
            }
        });

        tracing::debug!(%entity_id, interval_ms = config.tick_interval().as_millis() as u64, "countdown started");

        CountdownHandle {
            entity_id,
            state: rx,
            task: Some(task),
        }
    }
}

async fn delete_expired(deletion: &dyn EntityDeletionService, entity_id: &EventId) {
    match deletion.delete_entity(entity_id).await {
        Ok(ack) if ack.success => {
            tracing::info!(%entity_id, "expired entity deleted");
        }
        Ok(_) => {
            tracing::warn!(%entity_id, "deletion service did not confirm deletion");
        }
        Err(e) => {
            tracing::warn!(%entity_id, error = %e, "failed to delete expired entity");
        }
    }
}

/// Owner of a running countdown. Dropping it stops the timer.
#[derive(Debug)]
pub struct CountdownHandle {
    entity_id: EventId,
    state: watch::Receiver<CountdownState>,
    task: Option<JoinHandle<()>>,
}

impl CountdownHandle {
    pub fn entity_id(&self) -> &EventId {
        &self.entity_id
    }

    /// Most recently published state.
    pub fn state(&self) -> CountdownState {
        *self.state.borrow()
    }

    /// Receiver for following state changes.
    pub fn subscribe(&self) -> watch::Receiver<CountdownState> {
        self.state.clone()
    }

    /// Wait until the countdown reports `Expired` or the timer stops.
    pub async fn wait_expired(&mut self) -> CountdownState {
        let expired = self.state.wait_for(|s| s.is_expired()).await.map(|s| *s);
        match expired {
            Ok(state) => state,
            Err(_) => *self.state.borrow(),
        }
    }

    /// Wait for the timer task to finish. It finishes after expiry and the
    /// single deletion attempt.
    pub async fn finished(mut self) -> Result<CountdownState, JoinError> {
        if let Some(task) = self.task.take() {
            task.await?;
        }
        Ok(*self.state.borrow())
    }

    /// Stop ticking without waiting for expiry. A deletion already in
    /// flight still runs to completion.
    pub fn stop(mut self) {
        self.abort();
    }

    fn abort(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!(entity_id = %self.entity_id, "countdown stopped");
        }
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::{DeletionAck, ManualClock, TimedEntity};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingDeletion {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingDeletion {
        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EntityDeletionService for CountingDeletion {
        async fn delete_entity(&self, _id: &EventId) -> Result<DeletionAck, CommerceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(CommerceError::NetworkFailure("connection reset".into()))
            } else {
                Ok(DeletionAck { success: true })
            }
        }
    }

    #[derive(Default)]
    struct SlowDeletion {
        started: AtomicUsize,
        completed: AtomicUsize,
    }

    #[async_trait]
    impl EntityDeletionService for SlowDeletion {
        async fn delete_entity(&self, _id: &EventId) -> Result<DeletionAck, CommerceError> {
            self.started.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_secs(30)).await;
            self.completed.fetch_add(1, Ordering::SeqCst);
            Ok(DeletionAck { success: true })
        }
    }

    fn controller(finish_in: chrono::Duration, clock: &ManualClock) -> CountdownController {
        CountdownController::new(&TimedEntity::new("test-event-id", clock.now() + finish_in))
    }

    #[test]
    fn test_config_bounds() {
        assert!(CountdownConfig::from_millis(0).is_err());
        assert!(CountdownConfig::from_millis(1001).is_err());
        assert!(CountdownConfig::from_millis(1).is_ok());
        assert_eq!(
            CountdownConfig::default().tick_interval(),
            Duration::from_millis(1000)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_past_deadline_deletes_exactly_once() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let deletion = Arc::new(CountingDeletion::default());

        let handle = CountdownTimer::spawn(
            controller(chrono::Duration::seconds(-1), &clock),
            clock.clone(),
            deletion.clone(),
            CountdownConfig::from_millis(100).unwrap(),
        );
        assert!(handle.state().is_expired());

        let state = handle.finished().await.unwrap();
        assert_eq!(state, CountdownState::Expired);
        assert!(state.remaining().is_zero());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(deletion.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_counts_down_then_expires() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let deletion = Arc::new(CountingDeletion::default());

        let mut handle = CountdownTimer::spawn(
            controller(chrono::Duration::seconds(3), &clock),
            clock.clone(),
            deletion.clone(),
            CountdownConfig::default(),
        );
        assert_eq!(handle.state().remaining().seconds, 3);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(!handle.state().is_expired());
        assert_eq!(deletion.calls(), 0);

        clock.advance(chrono::Duration::seconds(5));
        let state = handle.wait_expired().await;
        assert!(state.is_expired());

        handle.finished().await.unwrap();
        assert_eq!(deletion.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_timer() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let deletion = Arc::new(CountingDeletion::default());

        let handle = CountdownTimer::spawn(
            controller(chrono::Duration::seconds(2), &clock),
            clock.clone(),
            deletion.clone(),
            CountdownConfig::default(),
        );
        drop(handle);

        clock.advance(chrono::Duration::seconds(10));
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(deletion.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deletion_failure_is_not_retried() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let deletion = Arc::new(CountingDeletion::failing());

        let handle = CountdownTimer::spawn(
            controller(chrono::Duration::zero(), &clock),
            clock.clone(),
            deletion.clone(),
            CountdownConfig::from_millis(10).unwrap(),
        );

        let state = handle.finished().await.unwrap();
        assert!(state.is_expired());
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(deletion.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_is_published_before_deletion_returns() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let deletion = Arc::new(SlowDeletion::default());

        let handle = CountdownTimer::spawn(
            controller(chrono::Duration::seconds(2), &clock),
            clock.clone(),
            deletion.clone(),
            CountdownConfig::default(),
        );

        clock.advance(chrono::Duration::seconds(3));
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(deletion.started.load(Ordering::SeqCst), 1);
        assert_eq!(deletion.completed.load(Ordering::SeqCst), 0);
        assert!(handle.state().is_expired());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_does_not_cancel_started_deletion() {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let deletion = Arc::new(SlowDeletion::default());

        let handle = CountdownTimer::spawn(
            controller(chrono::Duration::seconds(-1), &clock),
            clock.clone(),
            deletion.clone(),
            CountdownConfig::from_millis(10).unwrap(),
        );

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(deletion.started.load(Ordering::SeqCst), 1);
        drop(handle);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(deletion.started.load(Ordering::SeqCst), 1);
        assert_eq!(deletion.completed.load(Ordering::SeqCst), 1);
    }
}
