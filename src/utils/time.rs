use chrono::{DateTime, Local, NaiveTime};

pub const MS_PER_SECOND: u64 = 1_000;
pub const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

pub fn minutes_to_ms(minutes: u64) -> u64 {
    minutes * MS_PER_MINUTE
}

pub fn hours_to_ms(hours: u64) -> u64 {
    hours * MS_PER_HOUR
}

pub fn ms_to_minutes(ms: u64) -> u64 {
    ms / MS_PER_MINUTE
}

/// Renders a duration as a zero-padded `HH:MM:SS` clock string.
/// Hours are not wrapped at 24, so a 26 hour duration reads `26:00:00`.
pub fn format_clock(ms: u64) -> String {
    let total_secs = ms / MS_PER_SECOND;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Renders a duration as a compact human string, e.g. `1h 23m` or `45m`.
/// Sub-minute durations read `0m`.
pub fn format_duration(ms: u64) -> String {
    let total_minutes = ms / MS_PER_MINUTE;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Calendar date of a local timestamp, e.g. `2024-03-14`.
pub fn format_date(at: DateTime<Local>) -> String {
    at.format("%Y-%m-%d").to_string()
}

/// Wall-clock time of a local timestamp, e.g. `15:09`.
pub fn format_time_of_day(at: DateTime<Local>) -> String {
    at.format("%H:%M").to_string()
}

/// Local midnight of the day containing `now`. This is the day boundary the
/// summary/list load actions anchor their requests to.
pub fn local_day_start(now: DateTime<Local>) -> DateTime<Local> {
    now.with_time(NaiveTime::MIN).single().unwrap_or(now)
}
