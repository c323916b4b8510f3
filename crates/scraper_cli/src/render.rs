use scraper_core::{FilterName, TaskViewModel, ViewAction, ViewMode};
use url::Url;

/// Renders a view model to terminal lines.
///
/// `download` is the resolved download reference; without it the Ready view
/// falls back to the base-relative download path.
pub fn render(view: &TaskViewModel, download: Option<&Url>) -> Vec<String> {
    let mut lines = Vec::new();
    match &view.mode {
        ViewMode::Progress { message, progress } => {
            if progress.is_empty() {
                lines.push(format!("[working] {message}"));
            } else {
                lines.push(format!("[working] {message} ({progress})"));
            }
        }
        ViewMode::Ready { download_path, .. } => {
            lines.push("Your images are ready.".to_string());
            let target = download
                .map(Url::to_string)
                .unwrap_or_else(|| download_path.clone());
            lines.push(format!("Download: {target}"));
        }
        ViewMode::Failed { message } => {
            lines.push(format!("[failed] {message}"));
        }
    }

    for action in view.mode.actions() {
        if let ViewAction::NewSearch = action {
            lines.push("Try again: image-scraper scrape <query>".to_string());
        }
    }
    lines
}

/// Emits lines only when the view actually changed.
#[derive(Debug, Default)]
pub struct ProgressPrinter {
    last: Option<TaskViewModel>,
}

impl ProgressPrinter {
    pub fn update(&mut self, view: TaskViewModel, download: Option<&Url>) -> Option<Vec<String>> {
        if self.last.as_ref() == Some(&view) {
            return None;
        }
        let lines = render(&view, download);
        self.last = Some(view);
        Some(lines)
    }
}

pub fn render_filters() -> Vec<String> {
    let mut lines = Vec::new();
    for name in FilterName::ALL {
        lines.push(format!("{name}:"));
        for (token, label) in name.known_values() {
            lines.push(format!("  {token:<22} {label}"));
        }
    }
    lines
}
