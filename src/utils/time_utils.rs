use chrono::{DateTime, Duration, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const MIN_IN_H: u32 = 60;
    pub const STANDARD_TIME_FORMAT: &'static str = "%Y-%m-%d %H:%M";
    pub const SHORT_TIME_FORMAT: &'static str = "%H:%M";

    /// Slider-style label for a window: `5m`, `30m`, `1h`, `2h`, `90m`
    pub fn minutes_to_string(minutes: u32) -> String {
        if minutes >= Self::MIN_IN_H && minutes % Self::MIN_IN_H == 0 {
            format!("{}h", minutes / Self::MIN_IN_H)
        } else {
            format!("{}m", minutes)
        }
    }
}

pub fn format_utc(dt: &DateTime<Utc>) -> String {
    dt.format(TimeUtils::STANDARD_TIME_FORMAT).to_string()
}

pub fn format_utc_short(dt: &DateTime<Utc>) -> String {
    dt.format(TimeUtils::SHORT_TIME_FORMAT).to_string()
}

/// The instant `minutes` minutes before `now`
pub fn minutes_before(now: DateTime<Utc>, minutes: i64) -> DateTime<Utc> {
    now - Duration::minutes(minutes)
}
