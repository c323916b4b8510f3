use sha2::{Digest, Sha256};

const MAX_STEM_LEN: usize = 60;

/// Portable, deterministic archive name: `{sanitized_query}--{short_hash(task_id)}.zip`
pub fn archive_filename(query: Option<&str>, task_id: &str) -> String {
    let stem = sanitize_stem(query.unwrap_or("images"));
    let hash = short_hash(task_id);
    format!("{stem}--{hash}.zip")
}

fn sanitize_stem(input: &str) -> String {
    let mut stem = String::with_capacity(input.len());
    let mut prev_underscore = false;
    for c in input.trim().chars() {
        let c = if is_forbidden(c) || c.is_whitespace() {
            '_'
        } else {
            c
        };
        // Collapse runs of underscores
        if c == '_' && prev_underscore {
            continue;
        }
        prev_underscore = c == '_';
        stem.push(c);
    }

    let mut stem = stem.trim_matches(&['_', '.'][..]).to_string();
    if stem.len() > MAX_STEM_LEN {
        let mut cut = MAX_STEM_LEN;
        while !stem.is_char_boundary(cut) {
            cut -= 1;
        }
        stem.truncate(cut);
    }
    if stem.is_empty() {
        stem = "images".to_string();
    }
    if is_reserved_windows_name(&stem) {
        stem.push('_');
    }
    stem
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
