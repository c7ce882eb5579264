// src/timestamp.rs

//! Clock helpers for log-file names and readme entries.
//!
//! Tokens look like `20150918.43200`: the *local* calendar date followed by
//! the number of seconds since *UTC* midnight, zero-padded to five digits.
//! Resolution is one second, so two invocations inside the same second get
//! the same token; the process runner disambiguates file names on collision.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};

/// Format used for readme entries (ISO-8601, local time, no offset).
const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Token identifying "now" for log-file naming.
pub fn now_token() -> String {
    token_at(Utc::now())
}

/// Build a token from an explicit local date and UTC time of day.
pub fn token_from(local_date: NaiveDate, utc_time: NaiveTime) -> String {
    format!(
        "{}.{:05}",
        local_date.format("%Y%m%d"),
        utc_time.num_seconds_from_midnight()
    )
}

/// Local ISO-8601 timestamp for readme entries.
pub fn iso_now() -> String {
    iso_from(Local::now().naive_local())
}

pub fn iso_from(local: NaiveDateTime) -> String {
    local.format(ISO_FORMAT).to_string()
}

/// Parse a timestamp produced by [`iso_now`]; `None` if it is not one.
pub fn parse_iso(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, ISO_FORMAT).ok()
}

/// Token for a specific instant; used when replaying or testing.
pub fn token_at(instant: DateTime<Utc>) -> String {
    token_from(instant.with_timezone(&Local).date_naive(), instant.time())
}
