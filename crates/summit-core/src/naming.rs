//! Stored-name encoding and filename sanitization.
//!
//! The stored filename is the only persisted record of an upload's
//! identity: `{unixMillis}-{token}-{sanitizedName}` for documents,
//! `{unixMillis}-{token}.{ext}` for gallery images. The listing and
//! delete paths re-derive `(timestamp, token)` from the filename, so
//! every name this module renders must parse back.

use regex::Regex;
use std::sync::OnceLock;

/// Length of the random lowercase-alphanumeric storage token.
pub const TOKEN_LEN: usize = 6;

const TOKEN_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Timestamp and token recovered from a stored filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub timestamp_ms: i64,
    pub token: String,
}

fn stored_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d+)-([a-z0-9]+)[-.]").expect("stored-name pattern is valid")
    })
}

/// Generate a short random token. Uniqueness is statistical only: two
/// uploads in the same millisecond collide with probability 36^-6.
pub fn random_token() -> String {
    use rand::Rng;
    let mut rng = rand::rng();
    (0..TOKEN_LEN)
        .map(|_| TOKEN_CHARS[rng.random_range(0..TOKEN_CHARS.len())] as char)
        .collect()
}

/// Sanitize an original filename: every character outside
/// `[A-Za-z0-9.-]` becomes `_`, consecutive dots collapse to one,
/// leading dots are stripped, and the result is lowercased. Idempotent.
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let mut out = String::with_capacity(replaced.len());
    let mut prev_dot = false;
    for c in replaced.chars() {
        if c == '.' {
            if prev_dot {
                continue;
            }
            prev_dot = true;
        } else {
            prev_dot = false;
        }
        out.push(c);
    }

    out.trim_start_matches('.').to_lowercase()
}

/// Lowercased substring after the final `.`; the whole name when there
/// is no dot (such a "extension" then simply fails the allow-list).
pub fn extension_of(filename: &str) -> String {
    filename.rsplit('.').next().unwrap_or("").to_lowercase()
}

/// Filename without its final extension.
pub fn stem_of(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => filename,
    }
}

/// Stored name for the document surface: the sanitized original name
/// (extension included) rides along after the timestamp and token.
pub fn document_stored_name(timestamp_ms: i64, token: &str, sanitized: &str) -> String {
    format!("{}-{}-{}", timestamp_ms, token, sanitized)
}

/// Stored name for the gallery surface: timestamp, token, extension.
pub fn gallery_stored_name(timestamp_ms: i64, token: &str, extension: &str) -> String {
    format!("{}-{}.{}", timestamp_ms, token, extension)
}

/// Parse the `{digits}-{token}` prefix back out of a stored filename.
/// Returns `None` for names this system did not produce.
pub fn parse_stored_name(filename: &str) -> Option<ParsedName> {
    let caps = stored_name_re().captures(filename)?;
    let timestamp_ms: i64 = caps[1].parse().ok()?;
    Some(ParsedName {
        timestamp_ms,
        token: caps[2].to_string(),
    })
}

/// Stable identity for a file whose name does not follow the stored
/// format: the alphanumeric run of its stem, so repeated scans assign
/// the same token instead of regenerating a random one each time.
pub fn fallback_token(filename: &str) -> String {
    let derived: String = stem_of(filename)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if derived.is_empty() {
        "file".to_string()
    } else {
        derived
    }
}
