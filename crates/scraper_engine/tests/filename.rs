use scraper_engine::archive_filename;

#[test]
fn name_is_deterministic_per_task() {
    let first = archive_filename(Some("cats"), "abc");
    assert_eq!(first, archive_filename(Some("cats"), "abc"));
    assert_ne!(first, archive_filename(Some("cats"), "abd"));
    assert!(first.starts_with("cats--"));
    assert!(first.ends_with(".zip"));
    // stem + "--" + 8 hex chars + ".zip"
    assert_eq!(first.len(), "cats".len() + 2 + 8 + 4);
}

#[test]
fn query_is_sanitized() {
    let name = archive_filename(Some("  red / blue: cars?? "), "abc");
    assert!(name.starts_with("red_blue_cars--"), "{name}");

    let reserved = archive_filename(Some("con"), "abc");
    assert!(reserved.starts_with("con_--"), "{reserved}");

    let fallback = archive_filename(Some("???"), "abc");
    assert!(fallback.starts_with("images--"), "{fallback}");
    assert!(archive_filename(None, "abc").starts_with("images--"));
}

#[test]
fn long_queries_are_truncated_on_char_boundary() {
    let query = "ü".repeat(100);
    let name = archive_filename(Some(&query), "abc");
    let stem = name.split("--").next().unwrap();
    assert!(stem.len() <= 60);
    assert!(stem.chars().all(|c| c == 'ü'));
}
