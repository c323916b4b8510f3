use crate::{TaskHandle, TaskObservation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A status poll returned a parsed observation for the task.
    StatusObserved {
        handle: TaskHandle,
        observation: TaskObservation,
    },
    /// The status poll failed (transport or protocol error).
    ObservationUnavailable,
}
