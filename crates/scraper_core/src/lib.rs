//! Scraper core: pure task state machine, request model and view-model helpers.
mod effect;
mod msg;
mod request;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use request::{FilterName, RequestError, SearchFilters, SearchRequest, DEFAULT_IMAGE_COUNT};
pub use state::{
    TaskHandle, TaskObservation, TaskState, TaskStatus, INITIAL_MESSAGE, UNEXPECTED_ERROR_MESSAGE,
};
pub use update::update;
pub use view_model::{TaskViewModel, ViewAction, ViewMode};
