//! Reads from the serving host: its network name and the current UTC time.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::AppError;

/// The machine's host name, read on every call so renames show up immediately.
pub fn hostname() -> Result<String, AppError> {
    Ok(::hostname::get()?.to_string_lossy().into_owned())
}

/// Current UTC time as RFC 3339 with microseconds and an explicit `+00:00` offset.
pub fn timestamp() -> String {
    format_timestamp(Utc::now())
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, false)
}
