use std::sync::Once;

use pretty_assertions::assert_eq;
use scraper_core::{
    update, Effect, Msg, TaskHandle, TaskObservation, TaskState, TaskStatus, INITIAL_MESSAGE,
    UNEXPECTED_ERROR_MESSAGE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(scraper_logging::initialize_for_tests);
}

fn observed(task_id: &str, status: &str, message: &str, progress: &str) -> Msg {
    Msg::StatusObserved {
        handle: TaskHandle::new(task_id),
        observation: TaskObservation::new(TaskStatus::from_wire(status), message, progress),
    }
}

fn terminal_states() -> Vec<TaskState> {
    vec![
        TaskState::Ready {
            task_id: "abc".to_string(),
        },
        TaskState::Failed {
            message: "quota exceeded".to_string(),
        },
    ]
}

#[test]
fn initial_state_is_pending_initializing() {
    assert_eq!(
        TaskState::new(),
        TaskState::Pending {
            message: INITIAL_MESSAGE.to_string(),
            progress: String::new(),
        }
    );
    assert!(!TaskState::new().is_terminal());
}

#[test]
fn loading_maps_to_pending_with_matching_fields() {
    init_logging();
    let (state, effects) = update(
        TaskState::new(),
        observed("abc", "LOADING", "Fetching page 1", "1/10"),
    );

    assert_eq!(
        state,
        TaskState::Pending {
            message: "Fetching page 1".to_string(),
            progress: "1/10".to_string(),
        }
    );
    assert!(effects.is_empty());

    let (state, effects) = update(state, observed("abc", "LOADING", "Fetching page 2", "2/10"));
    assert_eq!(
        state,
        TaskState::Pending {
            message: "Fetching page 2".to_string(),
            progress: "2/10".to_string(),
        }
    );
    assert!(effects.is_empty());
}

#[test]
fn success_maps_to_ready_with_handle_task_id() {
    init_logging();
    let (state, _) = update(
        TaskState::new(),
        observed("abc", "LOADING", "Fetching page 1", "1/10"),
    );
    let (state, effects) = update(state, observed("abc", "SUCCESS", "", ""));

    assert_eq!(
        state,
        TaskState::Ready {
            task_id: "abc".to_string()
        }
    );
    assert_eq!(effects, vec![Effect::StopPolling]);
}

#[test]
fn explicit_and_unknown_statuses_map_to_failed_with_message() {
    init_logging();
    for status in ["ERROR", "FAILED", "loading", "success", ""] {
        let (state, effects) = update(
            TaskState::new(),
            observed("abc", status, "quota exceeded", "3/10"),
        );
        assert_eq!(
            state,
            TaskState::Failed {
                message: "quota exceeded".to_string()
            },
            "status {status:?}"
        );
        assert_eq!(effects, vec![Effect::StopPolling]);
    }
}

#[test]
fn unavailable_observation_fails_with_uniform_message() {
    init_logging();
    let pending = TaskState::Pending {
        message: "Fetching page 4".to_string(),
        progress: "4/10".to_string(),
    };
    for state in [TaskState::new(), pending] {
        let (next, effects) = update(state, Msg::ObservationUnavailable);
        assert_eq!(
            next,
            TaskState::Failed {
                message: UNEXPECTED_ERROR_MESSAGE.to_string()
            }
        );
        assert_eq!(effects, vec![Effect::StopPolling]);
    }
}

#[test]
fn terminal_states_absorb_every_message() {
    init_logging();
    for terminal in terminal_states() {
        for msg in [
            observed("abc", "LOADING", "again", "5/10"),
            observed("other", "SUCCESS", "", ""),
            observed("abc", "ERROR", "late failure", ""),
            Msg::ObservationUnavailable,
        ] {
            let (next, effects) = update(terminal.clone(), msg);
            assert_eq!(next, terminal);
            assert!(effects.is_empty());
        }
    }
}

#[test]
fn update_is_referentially_transparent() {
    let state = TaskState::Pending {
        message: "Fetching page 2".to_string(),
        progress: "2/10".to_string(),
    };
    let msg = observed("abc", "LOADING", "Fetching page 3", "3/10");

    let first = update(state.clone(), msg.clone());
    let second = update(state, msg);
    assert_eq!(first, second);
}
