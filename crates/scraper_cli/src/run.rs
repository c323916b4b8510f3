use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use scraper_core::{TaskHandle, TaskState};
use scraper_engine::{
    archive_filename, download_archive, AtomicFileWriter, ChannelStateSink, PollEvent,
    PollSettings, Poller, ReqwestTaskClient, TaskClient,
};
use scraper_logging::{scraper_info, scraper_warn};
use url::Url;

use crate::cli::ScrapeArgs;
use crate::config::ScraperConfig;
use crate::render::ProgressPrinter;

/// How a tracked task ended, from the user's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Ready {
        task_id: String,
        download: Url,
        archive: Option<PathBuf>,
    },
    Failed {
        message: String,
    },
    Interrupted,
}

impl Outcome {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Outcome::Ready { .. } => ExitCode::SUCCESS,
            Outcome::Failed { .. } => ExitCode::from(1),
            Outcome::Interrupted => ExitCode::from(130),
        }
    }
}

/// Submits a search and follows it. Submit errors return before any polling.
pub async fn scrape(config: &ScraperConfig, args: &ScrapeArgs) -> Result<Outcome> {
    let request = args.to_request().context("invalid search")?;
    for (name, value) in request.filters().unrecognized() {
        scraper_warn!("Passing unrecognized {} filter value {:?} through", name, value);
    }

    let client = Arc::new(ReqwestTaskClient::new(config.client_settings()?)?);
    let handle = client
        .submit(&request)
        .await
        .context("submitting search")?;
    println!("Submitted task {handle}");

    let output = args.output.as_ref().map(|dir| OutputTarget {
        dir: dir.clone(),
        query: Some(request.query().to_string()),
    });
    track(client, config.poll_settings()?, handle, output).await
}

/// Attaches to an existing task id.
pub async fn watch(config: &ScraperConfig, task_id: &str, output: Option<PathBuf>) -> Result<Outcome> {
    let client = Arc::new(ReqwestTaskClient::new(config.client_settings()?)?);
    let output = output.map(|dir| OutputTarget { dir, query: None });
    track(client, config.poll_settings()?, TaskHandle::new(task_id), output).await
}

pub fn download_url(config: &ScraperConfig, task_id: &str) -> Result<Url> {
    let client = ReqwestTaskClient::new(config.client_settings()?)?;
    Ok(client.download_reference(&TaskHandle::new(task_id)))
}

pub struct OutputTarget {
    pub dir: PathBuf,
    pub query: Option<String>,
}

/// Polls `handle` until it is terminal or the user interrupts, printing each
/// view change, then optionally downloads the archive.
pub async fn track(
    client: Arc<ReqwestTaskClient>,
    poll: PollSettings,
    handle: TaskHandle,
    output: Option<OutputTarget>,
) -> Result<Outcome> {
    let download = client.download_reference(&handle);
    let mut printer = ProgressPrinter::default();
    print_lines(printer.update(TaskState::new().view(), None));

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let poller = Poller::new(client.clone(), poll);
    let poller_handle = poller.start(handle.clone(), Arc::new(ChannelStateSink::new(tx)));

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut state = TaskState::new();
    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(PollEvent::StateChanged { state: next, .. }) => {
                    state = next;
                    print_lines(printer.update(state.view(), Some(&download)));
                    if state.is_terminal() {
                        break;
                    }
                }
                None => break,
            },
            _ = &mut ctrl_c => {
                scraper_info!("Interrupted while tracking task {}", handle);
                poller_handle.stop();
                return Ok(Outcome::Interrupted);
            }
        }
    }
    poller_handle.stop();

    match state {
        TaskState::Ready { task_id } => {
            let archive = match output {
                Some(target) => {
                    let writer = AtomicFileWriter::new(target.dir);
                    let filename = archive_filename(target.query.as_deref(), &task_id);
                    let saved = download_archive(&client, &handle, &writer, &filename)
                        .await
                        .context("downloading archive")?;
                    println!("Saved {} ({} bytes)", saved.path.display(), saved.bytes);
                    Some(saved.path)
                }
                None => None,
            };
            Ok(Outcome::Ready {
                task_id,
                download,
                archive,
            })
        }
        TaskState::Failed { message } => Ok(Outcome::Failed { message }),
        TaskState::Pending { .. } => Ok(Outcome::Interrupted),
    }
}

fn print_lines(lines: Option<Vec<String>>) {
    for line in lines.into_iter().flatten() {
        println!("{line}");
    }
}
