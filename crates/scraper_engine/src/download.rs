use std::path::PathBuf;

use futures_util::StreamExt;
use scraper_core::TaskHandle;
use scraper_logging::{scraper_info, scraper_warn};
use thiserror::Error;

use crate::client::map_reqwest_error;
use crate::{AtomicFileWriter, ClientError, PersistError, ReqwestTaskClient};

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedArchive {
    pub path: PathBuf,
    pub bytes: u64,
}

/// Streams the finished archive of `handle` to `{writer.dir}/{filename}`.
///
/// A failed transfer leaves no file behind.
pub async fn download_archive(
    client: &ReqwestTaskClient,
    handle: &TaskHandle,
    writer: &AtomicFileWriter,
    filename: &str,
) -> Result<DownloadedArchive, DownloadError> {
    let response = client.open_download(handle).await?;
    let mut pending = writer.begin(filename)?;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(err) => {
                scraper_warn!(
                    "Archive download for task {} aborted after {} bytes: {}",
                    handle,
                    pending.written(),
                    err
                );
                return Err(map_reqwest_error(err).into());
            }
        };
        pending.write_chunk(&chunk)?;
    }

    let bytes = pending.written();
    let path = pending.commit()?;
    scraper_info!("Saved archive for task {} to {:?} ({} bytes)", handle, path, bytes);
    Ok(DownloadedArchive { path, bytes })
}
