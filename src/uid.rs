//! Key (UID) generation and path normalization.
//!
//! Generated keys are lexically sortable by write time:
//! `YYYY/MM/DD/HH/MM/SS/<0-999>/<sanitized name>`. The random segment reduces
//! same-second collisions; the sanitized name keeps the key human-readable
//! and preserves any file extension. Uniqueness is not enforced here - the
//! transport decides what a key collision means (typically overwrite).

use chrono::Utc;
use rand::Rng;

/// Name used when the content has none
const FALLBACK_NAME: &str = "file";

/// Generate a timestamped key for the given content name
pub fn generate(name: Option<&str>) -> String {
    let stamp = Utc::now().format("%Y/%m/%d/%H/%M/%S");
    let suffix = rand::thread_rng().gen_range(0..1000);
    format!("{}/{}/{}", stamp, suffix, sanitize(name.unwrap_or(FALLBACK_NAME)))
}

/// Replace every maximal run of characters outside `[A-Za-z0-9_.]` with a
/// single underscore
pub fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_run = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '.' {
            out.push(ch);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}

/// Join a key's segments with `/`, dropping empty segments
pub fn full_path(uid: &str) -> String {
    uid.split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
