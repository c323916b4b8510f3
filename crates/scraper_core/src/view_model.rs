use crate::{TaskHandle, TaskState};

/// Actions a view offers to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    /// Fetch the finished archive.
    Download,
    /// Go back to the submission form and start a brand new task.
    NewSearch,
}

/// The three mutually exclusive view modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    Progress { message: String, progress: String },
    Ready { task_id: String, download_path: String },
    Failed { message: String },
}

impl ViewMode {
    pub fn actions(&self) -> &'static [ViewAction] {
        match self {
            ViewMode::Progress { .. } => &[],
            ViewMode::Ready { .. } => &[ViewAction::Download],
            ViewMode::Failed { .. } => &[ViewAction::NewSearch],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskViewModel {
    pub mode: ViewMode,
    pub is_terminal: bool,
}

impl TaskState {
    pub fn view(&self) -> TaskViewModel {
        let mode = match self {
            TaskState::Pending { message, progress } => ViewMode::Progress {
                message: message.clone(),
                progress: progress.clone(),
            },
            TaskState::Ready { task_id } => ViewMode::Ready {
                task_id: task_id.clone(),
                download_path: TaskHandle::new(task_id.as_str()).download_path(),
            },
            TaskState::Failed { message } => ViewMode::Failed {
                message: message.clone(),
            },
        };
        TaskViewModel {
            mode,
            is_terminal: self.is_terminal(),
        }
    }
}
