use std::fs;

use scraper_engine::{ensure_output_dir, AtomicFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("cats.zip", b"first").unwrap();
    assert_eq!(first.file_name().unwrap(), "cats.zip");
    assert_eq!(fs::read(&first).unwrap(), b"first");

    let second = writer.write("cats.zip", b"second").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read(&second).unwrap(), b"second");
}

#[test]
fn uncommitted_file_is_never_visible() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let mut pending = writer.begin("partial.zip").unwrap();
    pending.write_chunk(b"half").unwrap();
    assert_eq!(pending.written(), 4);
    assert!(!temp.path().join("partial.zip").exists());
    drop(pending);

    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn output_path_that_is_a_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    assert!(writer.write("cats.zip", b"data").is_err());
    assert!(!file_path.with_file_name("cats.zip").exists());
}
