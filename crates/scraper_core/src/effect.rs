/// Side effects requested by [`crate::update`]; executed by the poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The task reached a terminal state; the polling timer must stop before
    /// the new state is published.
    StopPolling,
}
