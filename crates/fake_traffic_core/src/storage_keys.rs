use chrono::{DateTime, Utc};

pub const SESSION_LOG_PREFIX: &str = "logs";
pub const SESSION_LOG_CONTENT_TYPE: &str = "application/json";

/// Compact UTC stamp used in object keys, e.g. `20260214T093015Z`.
pub fn session_stamp(captured_at: DateTime<Utc>) -> String {
    captured_at.format("%Y%m%dT%H%M%SZ").to_string()
}

pub fn session_object_key(captured_at: DateTime<Utc>) -> String {
    format!(
        "{SESSION_LOG_PREFIX}/session-{}.json",
        session_stamp(captured_at)
    )
}
