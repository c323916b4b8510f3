use std::fs;

use scraper_core::TaskHandle;
use scraper_engine::{
    archive_filename, download_archive, AtomicFileWriter, ClientSettings, DownloadError,
    FailureKind, ReqwestTaskClient,
};
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestTaskClient {
    ReqwestTaskClient::new(ClientSettings::new(Url::parse(&server.uri()).unwrap())).unwrap()
}

#[tokio::test]
async fn archive_is_streamed_to_output_dir() {
    let server = MockServer::start().await;
    let payload = vec![7u8; 64 * 1024];
    Mock::given(method("GET"))
        .and(path("/download-scraped-images/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(payload.clone(), "application/zip"))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().join("archives"));
    let filename = archive_filename(Some("cats"), "abc");

    let archive = download_archive(&client_for(&server), &TaskHandle::new("abc"), &writer, &filename)
        .await
        .unwrap();

    assert_eq!(archive.bytes, payload.len() as u64);
    assert_eq!(archive.path, temp.path().join("archives").join(&filename));
    assert_eq!(fs::read(&archive.path).unwrap(), payload);
}

#[tokio::test]
async fn failed_download_leaves_no_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/download-scraped-images/gone"))
        .respond_with(ResponseTemplate::new(410))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let err = download_archive(
        &client_for(&server),
        &TaskHandle::new("gone"),
        &writer,
        "gone.zip",
    )
    .await
    .unwrap_err();

    match err {
        DownloadError::Client(err) => assert_eq!(err.kind, FailureKind::HttpStatus(410)),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}
