use scraper_core::{TaskState, ViewAction, ViewMode, INITIAL_MESSAGE};

#[test]
fn pending_selects_progress_view() {
    let view = TaskState::new().view();
    assert_eq!(
        view.mode,
        ViewMode::Progress {
            message: INITIAL_MESSAGE.to_string(),
            progress: String::new(),
        }
    );
    assert!(!view.is_terminal);
    assert!(view.mode.actions().is_empty());
}

#[test]
fn ready_selects_download_view() {
    let view = TaskState::Ready {
        task_id: "abc".to_string(),
    }
    .view();
    assert_eq!(
        view.mode,
        ViewMode::Ready {
            task_id: "abc".to_string(),
            download_path: "/download-scraped-images/abc".to_string(),
        }
    );
    assert!(view.is_terminal);
    assert_eq!(view.mode.actions(), &[ViewAction::Download]);
}

#[test]
fn failed_selects_failure_view_with_restart() {
    let view = TaskState::Failed {
        message: "quota exceeded".to_string(),
    }
    .view();
    assert_eq!(
        view.mode,
        ViewMode::Failed {
            message: "quota exceeded".to_string()
        }
    );
    assert!(view.is_terminal);
    assert_eq!(view.mode.actions(), &[ViewAction::NewSearch]);
}
