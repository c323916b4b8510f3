//! Scraper engine: task client, status poller and archive download.
mod client;
mod download;
mod filename;
mod persist;
mod poller;
mod types;

pub use client::{ClientSettings, ReqwestTaskClient, TaskClient, DEFAULT_BASE_URL};
pub use download::{download_archive, DownloadError, DownloadedArchive};
pub use filename::archive_filename;
pub use persist::{ensure_output_dir, AtomicFileWriter, PendingFile, PersistError};
pub use poller::{ChannelStateSink, PollEvent, PollSettings, Poller, PollerHandle, StateSink};
pub use types::{ClientError, ErrorClass, FailureKind};
