

use tracing::debug;


#[inline]
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}


#[inline]
pub fn safe_truncate_ellipsis(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    } else {
        s.to_string()
    }
}

/// Trims a raw user query and caps it at `max_chars` characters.
pub fn bound_query(raw: &str, max_chars: usize) -> String {
    let trimmed = raw.trim();
    let len = trimmed.chars().count();
    if len <= max_chars {
        return trimmed.to_string();
    }

    debug!("Query truncated from {} to {} chars", len, max_chars);
    safe_truncate(trimmed, max_chars).trim_end().to_string()
}
