use std::fs;
use std::time::Duration;

use pretty_assertions::assert_eq;
use scraper_cli::config::ScraperConfig;
use tempfile::TempDir;

#[test]
fn missing_default_file_yields_defaults() {
    let temp = TempDir::new().unwrap();
    let config = ScraperConfig::load(&temp.path().join("image-scraper.ron"), false).unwrap();
    assert_eq!(config, ScraperConfig::default());
    assert_eq!(config.base_url, "http://localhost:4000");
    assert_eq!(config.poll_interval_ms, 1000);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    assert!(ScraperConfig::load(&temp.path().join("nope.ron"), true).is_err());
}

#[test]
fn partial_file_keeps_remaining_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("image-scraper.ron");
    fs::write(
        &path,
        r#"(base_url: "https://scraper.example.com/api/", poll_interval_ms: 250)"#,
    )
    .unwrap();

    let config = ScraperConfig::load(&path, true).unwrap();
    assert_eq!(config.base_url, "https://scraper.example.com/api/");
    assert_eq!(config.poll_interval_ms, 250);
    assert_eq!(config.request_timeout_secs, 30);
}

#[test]
fn malformed_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("image-scraper.ron");
    fs::write(&path, "(base_url: 42").unwrap();
    assert!(ScraperConfig::load(&path, false).is_err());
}

#[test]
fn overrides_win_over_file_values() {
    let config = ScraperConfig::default()
        .with_overrides(Some("http://10.0.0.5:4000".to_string()), Some(50));
    assert_eq!(config.base_url, "http://10.0.0.5:4000");
    assert_eq!(config.poll_settings().unwrap().interval, Duration::from_millis(50));

    let untouched = ScraperConfig::default().with_overrides(None, None);
    assert_eq!(untouched, ScraperConfig::default());
}

#[test]
fn settings_are_validated() {
    let config = ScraperConfig::default().with_overrides(Some("not a url".to_string()), Some(0));
    assert!(config.client_settings().is_err());
    assert!(config.poll_settings().is_err());

    let settings = ScraperConfig::default().client_settings().unwrap();
    assert_eq!(settings.base_url.as_str(), "http://localhost:4000/");
    assert_eq!(settings.connect_timeout, Duration::from_secs(10));
}
