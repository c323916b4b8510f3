use crate::{Effect, Msg, TaskHandle, TaskObservation, TaskState, TaskStatus, UNEXPECTED_ERROR_MESSAGE};

/// Pure update function: applies a message to state and returns any effects.
///
/// Terminal states absorb every message. `Effect::StopPolling` is emitted
/// exactly once, on the transition into a terminal state.
pub fn update(state: TaskState, msg: Msg) -> (TaskState, Vec<Effect>) {
    if state.is_terminal() {
        return (state, Vec::new());
    }

    let next = match msg {
        Msg::StatusObserved {
            handle,
            observation,
        } => apply_observation(handle, observation),
        Msg::ObservationUnavailable => TaskState::Failed {
            message: UNEXPECTED_ERROR_MESSAGE.to_string(),
        },
    };

    let effects = if next.is_terminal() {
        vec![Effect::StopPolling]
    } else {
        Vec::new()
    };
    (next, effects)
}

fn apply_observation(handle: TaskHandle, observation: TaskObservation) -> TaskState {
    match observation.status {
        TaskStatus::InProgress => TaskState::Pending {
            message: observation.message,
            progress: observation.progress,
        },
        // The id comes from the handle that was polled, never from the payload.
        TaskStatus::Done => TaskState::Ready {
            task_id: handle.task_id().to_string(),
        },
        TaskStatus::Failed => TaskState::Failed {
            message: observation.message,
        },
    }
}
