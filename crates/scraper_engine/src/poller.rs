use std::sync::Arc;
use std::time::Duration;

use scraper_core::{update, Effect, Msg, TaskHandle, TaskState};
use scraper_logging::{scraper_debug, scraper_info, scraper_warn};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::TaskClient;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
pub struct PollSettings {
    /// Delay before the first status call and between subsequent calls.
    pub interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollEvent {
    StateChanged { task_id: String, state: TaskState },
}

/// Receives every state the poller computes, in order.
pub trait StateSink: Send + Sync {
    fn publish(&self, event: PollEvent);
}

pub struct ChannelStateSink {
    tx: UnboundedSender<PollEvent>,
}

impl ChannelStateSink {
    pub fn new(tx: UnboundedSender<PollEvent>) -> Self {
        Self { tx }
    }
}

impl StateSink for ChannelStateSink {
    fn publish(&self, event: PollEvent) {
        let _ = self.tx.send(event);
    }
}

/// Drives status polling for submitted tasks.
pub struct Poller {
    client: Arc<dyn TaskClient>,
    settings: PollSettings,
}

impl Poller {
    pub fn new(client: Arc<dyn TaskClient>, settings: PollSettings) -> Self {
        Self { client, settings }
    }

    /// Spawns the poll loop for `handle` on the current tokio runtime.
    ///
    /// The first status call happens one interval after this returns. The loop
    /// runs until the task reaches a terminal state or the returned handle is
    /// stopped or dropped.
    pub fn start(&self, handle: TaskHandle, sink: Arc<dyn StateSink>) -> PollerHandle {
        let token = CancellationToken::new();
        let interval = self.settings.interval.max(MIN_INTERVAL);
        scraper_info!(
            "Polling task {} every {}ms",
            handle,
            interval.as_millis()
        );

        let task = tokio::spawn(poll_loop(
            self.client.clone(),
            handle.clone(),
            interval,
            token.clone(),
            sink,
        ));

        PollerHandle {
            handle,
            token: token.clone(),
            task,
            _guard: token.drop_guard(),
        }
    }
}

/// Owns one running poll loop. Dropping the handle stops the loop.
pub struct PollerHandle {
    handle: TaskHandle,
    token: CancellationToken,
    task: JoinHandle<TaskState>,
    _guard: DropGuard,
}

impl PollerHandle {
    /// Stops polling. Idempotent; a response still in flight is discarded.
    pub fn stop(&self) {
        if !self.token.is_cancelled() {
            scraper_info!("Stopping poller for task {}", self.handle);
        }
        self.token.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Waits for the loop to exit and returns the last state it held.
    pub async fn wait(self) -> Result<TaskState, JoinError> {
        self.task.await
    }
}

async fn poll_loop(
    client: Arc<dyn TaskClient>,
    handle: TaskHandle,
    interval: Duration,
    token: CancellationToken,
    sink: Arc<dyn StateSink>,
) -> TaskState {
    // The only copy of the state; every tick composes from its latest value.
    let mut state = TaskState::new();
    let mut ticker = interval_at(Instant::now() + interval, interval);
    // A slow call delays the schedule instead of queueing extra ticks.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => {
                scraper_debug!("Discarding in-flight status call for task {}", handle);
                break;
            }
            result = client.fetch_status(&handle) => result,
        };
        if token.is_cancelled() {
            break;
        }

        let msg = match result {
            Ok(observation) => {
                scraper_debug!(
                    "Task {} status={:?} progress={:?}",
                    handle,
                    observation.status,
                    observation.progress
                );
                Msg::StatusObserved {
                    handle: handle.clone(),
                    observation,
                }
            }
            Err(err) => {
                scraper_warn!("Status call for task {} failed: {}", handle, err);
                Msg::ObservationUnavailable
            }
        };

        let (next, effects) = update(state, msg);
        state = next;

        let mut stop = false;
        for effect in effects {
            match effect {
                Effect::StopPolling => stop = true,
            }
        }
        if stop {
            token.cancel();
            scraper_info!("Task {} reached terminal state {:?}", handle, state);
        }

        sink.publish(PollEvent::StateChanged {
            task_id: handle.task_id().to_string(),
            state: state.clone(),
        });

        if stop {
            break;
        }
    }

    state
}
