//! Log sanitization utilities
//!
//! Keeps access tokens, passwords and large response bodies out of debug logs.

/// Maximum number of bytes of a body included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters of a secret kept visible.
const SECRET_VISIBLE_PREFIX: usize = 4;

fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a response body for logging.
///
/// Bodies within the limit are returned as-is; longer ones keep the first
/// `TRUNCATE_LIMIT` bytes and note the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    format!(
        "{}... [truncated, total {} bytes]",
        &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
        s.len()
    )
}

/// Mask a secret (API key, access token) so only a short prefix is logged.
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(SECRET_VISIBLE_PREFIX).collect();
    if visible.len() == secret.len() {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}
