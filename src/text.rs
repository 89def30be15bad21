//! Small wording helpers shared by command replies.

use chrono::{DateTime, FixedOffset, Utc};

/// "s" unless the count is exactly one
pub fn plural_suffix(count: i64) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Japan Standard Time, UTC+9 with no daylight saving
const JST_OFFSET_SECS: i32 = 9 * 3600;

/// Reply for the time command, e.g. "It's currently 9:05:03, Tuesday, March 5, 2024 JST."
pub fn jst_time_message(now: DateTime<Utc>) -> String {
    match FixedOffset::east_opt(JST_OFFSET_SECS) {
        Some(jst) => format!(
            "It's currently {}.",
            now.with_timezone(&jst).format("%-H:%M:%S, %A, %B %-d, %Y JST")
        ),
        None => format!("It's currently {}.", now.format("%-H:%M:%S, %A, %B %-d, %Y UTC")),
    }
}

/// Where a message came from, for log lines and replies
pub fn location_label(guild: Option<&str>) -> &str {
    guild.unwrap_or("a direct message")
}
