use std::fmt;

/// Message shown before the first status observation arrives.
pub const INITIAL_MESSAGE: &str = "Initializing...";
/// The only message a user sees when a status poll fails.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An Unexpected Error Occurred";

const STATUS_PATH: &str = "check-scraping-progress";
const DOWNLOAD_PATH: &str = "download-scraped-images";

/// Identifies one remote scraping job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskHandle {
    task_id: String,
}

impl TaskHandle {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Path segments of the status endpoint, base-relative.
    pub fn status_segments(&self) -> [&str; 2] {
        [STATUS_PATH, &self.task_id]
    }

    /// Path segments of the archive download endpoint, base-relative.
    pub fn download_segments(&self) -> [&str; 2] {
        [DOWNLOAD_PATH, &self.task_id]
    }

    /// Root-relative download path, e.g. `/download-scraped-images/abc`.
    ///
    /// The id is inserted verbatim; callers that build real URLs should use
    /// [`TaskHandle::download_segments`] so the id gets percent-encoded.
    pub fn download_path(&self) -> String {
        format!("/{DOWNLOAD_PATH}/{}", self.task_id)
    }
}

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.task_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    InProgress,
    Done,
    Failed,
}

impl TaskStatus {
    /// Maps the remote `status` field. Anything unrecognized counts as failure.
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "LOADING" => TaskStatus::InProgress,
            "SUCCESS" => TaskStatus::Done,
            _ => TaskStatus::Failed,
        }
    }
}

/// One polled snapshot of a task's remote status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskObservation {
    pub status: TaskStatus,
    pub message: String,
    /// Human-readable, opaque progress such as `12/50`.
    pub progress: String,
}

impl TaskObservation {
    pub fn new(status: TaskStatus, message: impl Into<String>, progress: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            progress: progress.into(),
        }
    }
}

/// UI-facing task state. `Ready` and `Failed` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    Pending { message: String, progress: String },
    Ready { task_id: String },
    Failed { message: String },
}

impl Default for TaskState {
    fn default() -> Self {
        TaskState::Pending {
            message: INITIAL_MESSAGE.to_string(),
            progress: String::new(),
        }
    }
}

impl TaskState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Ready { .. } | TaskState::Failed { .. })
    }
}
