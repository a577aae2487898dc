use chrono::{DateTime, Duration, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

// Prefix-anchored on purpose: "10m from now" still reads as ten minutes.
#[allow(clippy::unwrap_used)]
static RELATIVE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)([mhd])").unwrap());
#[allow(clippy::unwrap_used)]
static CLOCK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{2})").unwrap());

/// Parses a reminder time string relative to `now`.
///
/// Accepted forms, tried in order:
/// - `<digits><unit>` with unit `m`/`h`/`d`, a relative offset ("10m", "2h", "1d")
/// - `<H>:<MM>` or `<HH>:<MM>`, the next occurrence of that clock time in
///   `now`'s timezone (today, or tomorrow if it already passed)
///
/// Returns `None` for anything else, including out-of-range clock values
/// like "25:30".
pub fn parse_reminder_time<Tz: TimeZone>(input: &str, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
    let input = input.trim().to_lowercase();

    if let Some(caps) = RELATIVE_RE.captures(&input) {
        let value: i64 = caps.get(1)?.as_str().parse().ok()?;
        let offset = match caps.get(2)?.as_str() {
            "m" => Duration::minutes(value),
            "h" => Duration::hours(value),
            "d" => Duration::days(value),
            _ => return None,
        };
        return now.clone().checked_add_signed(offset);
    }

    if let Some(caps) = CLOCK_RE.captures(&input) {
        let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
        let minute: u32 = caps.get(2)?.as_str().parse().ok()?;

        let mut target = now.date_naive().and_hms_opt(hour, minute, 0)?;
        if target < now.naive_local() {
            target += Duration::days(1);
        }
        return now.timezone().from_local_datetime(&target).earliest();
    }

    None
}

/// Formats an instant the way the bot displays reminder and note timestamps.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Short day format used in the 3-day weather forecast ("Mon, Jan 01").
pub fn format_forecast_date(date: &str) -> String {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%a, %b %d").to_string())
        .unwrap_or_else(|_| date.to_string())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_relative_minutes() {
        let now = at(2024, 1, 1, 15, 0, 0);
        let fire_at = parse_reminder_time("10m", &now).unwrap();
        assert_eq!(fire_at - now, Duration::seconds(600));
    }

    #[test]
    fn test_relative_hours_and_days() {
        let now = at(2024, 1, 1, 15, 0, 0);
        assert_eq!(
            parse_reminder_time("2h", &now).unwrap() - now,
            Duration::hours(2)
        );
        assert_eq!(
            parse_reminder_time("1d", &now).unwrap() - now,
            Duration::days(1)
        );
    }

    #[test]
    fn test_relative_is_prefix_matched() {
        let now = at(2024, 1, 1, 15, 0, 0);
        // Trailing text after the pattern is tolerated, as in the original.
        let fire_at = parse_reminder_time("10m from now", &now).unwrap();
        assert_eq!(fire_at - now, Duration::seconds(600));
    }

    #[test]
    fn test_clock_time_already_passed_rolls_to_tomorrow() {
        let now = at(2024, 1, 1, 15, 0, 0);
        let fire_at = parse_reminder_time("14:30", &now).unwrap();
        assert_eq!(fire_at, at(2024, 1, 2, 14, 30, 0));
    }

    #[test]
    fn test_clock_time_later_today_stays_today() {
        let now = at(2024, 1, 1, 15, 0, 0);
        let fire_at = parse_reminder_time("16:45", &now).unwrap();
        assert_eq!(fire_at, at(2024, 1, 1, 16, 45, 0));
    }

    #[test]
    fn test_clock_time_exactly_now_stays_today() {
        let now = at(2024, 1, 1, 15, 0, 0);
        let fire_at = parse_reminder_time("15:00", &now).unwrap();
        assert_eq!(fire_at, now);
    }

    #[test]
    fn test_invalid_inputs() {
        let now = at(2024, 1, 1, 15, 0, 0);
        assert!(parse_reminder_time("bogus", &now).is_none());
        assert!(parse_reminder_time("", &now).is_none());
        assert!(parse_reminder_time("m10", &now).is_none());
        assert!(parse_reminder_time("10w", &now).is_none());
    }

    #[test]
    fn test_out_of_range_clock_time_is_a_parse_failure() {
        let now = at(2024, 1, 1, 15, 0, 0);
        assert!(parse_reminder_time("25:30", &now).is_none());
        assert!(parse_reminder_time("12:75", &now).is_none());
    }

    #[test]
    fn test_whitespace_and_case_are_tolerated() {
        let now = at(2024, 1, 1, 15, 0, 0);
        assert!(parse_reminder_time("  10M  ", &now).is_some());
    }

    #[test]
    fn test_format_forecast_date() {
        assert_eq!(format_forecast_date("2024-01-01"), "Mon, Jan 01");
        assert_eq!(format_forecast_date("not-a-date"), "not-a-date");
    }
}
