/// Seconds used whenever a displayed time cannot be split into `HH:MM:SS`.
pub const FALLBACK_DURATION_SECS: i64 = 300;

/// Convert a displayed `HH:MM:SS` string into seconds.
///
/// Each component is read leniently (see [`parse_leading_int`]) so a garbled
/// component counts as zero. A string that does not have exactly three
/// components, or whose total overflows, yields [`FALLBACK_DURATION_SECS`].
pub fn parse_duration_string(time: &str) -> i64 {
    let parts: Vec<&str> = time.split(':').collect();
    if parts.len() != 3 {
        log::warn!(
            "Malformed timer value '{}', using {} seconds",
            time,
            FALLBACK_DURATION_SECS
        );
        return FALLBACK_DURATION_SECS;
    }

    let hours = parse_leading_int(parts[0]);
    let minutes = parse_leading_int(parts[1]);
    let seconds = parse_leading_int(parts[2]);

    hms_to_seconds(hours, minutes, seconds).unwrap_or_else(|| {
        log::warn!(
            "Timer value '{}' out of range, using {} seconds",
            time,
            FALLBACK_DURATION_SECS
        );
        FALLBACK_DURATION_SECS
    })
}

/// `h * 3600 + m * 60 + s`, or `None` on overflow.
pub fn hms_to_seconds(hours: i64, minutes: i64, seconds: i64) -> Option<i64> {
    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}

/// Read the integer at the start of `s`: leading whitespace, an optional
/// sign, then digits. Trailing garbage is ignored. No digits (or a value
/// that does not fit in an `i64`) reads as 0.
pub fn parse_leading_int(s: &str) -> i64 {
    let trimmed = s.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];

    match digits.parse::<i64>() {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) => 0,
    }
}

/// Render seconds as zero-padded `HH:MM:SS`.
pub fn format_hms(total_seconds: i64) -> String {
    let sign = if total_seconds < 0 { "-" } else { "" };
    let total = total_seconds.unsigned_abs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{}{:02}:{:02}:{:02}", sign, hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed() {
        assert_eq!(parse_duration_string("00:05:00"), 300);
        assert_eq!(parse_duration_string("01:02:03"), 3723);
        assert_eq!(parse_duration_string("00:10:00"), 600);
        assert_eq!(parse_duration_string("00:00:00"), 0);
        assert_eq!(parse_duration_string("123:00:01"), 442801);
    }

    #[test]
    fn test_parse_wrong_part_count_falls_back() {
        assert_eq!(parse_duration_string("bad"), FALLBACK_DURATION_SECS);
        assert_eq!(parse_duration_string("1:2"), FALLBACK_DURATION_SECS);
        assert_eq!(parse_duration_string(""), FALLBACK_DURATION_SECS);
        assert_eq!(parse_duration_string("1:2:3:4"), FALLBACK_DURATION_SECS);
    }

    #[test]
    fn test_parse_overflow_falls_back() {
        let huge = format!("{}:00:00", i64::MAX);
        assert_eq!(parse_duration_string(&huge), FALLBACK_DURATION_SECS);
    }

    #[test]
    fn test_parse_garbled_components_count_as_zero() {
        assert_eq!(parse_duration_string("xx:05:yy"), 300);
        assert_eq!(parse_duration_string("::"), 0);
        assert_eq!(parse_duration_string("1h:2m:3s"), 3723);
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("42"), 42);
        assert_eq!(parse_leading_int("  7"), 7);
        assert_eq!(parse_leading_int("-05"), -5);
        assert_eq!(parse_leading_int("+3"), 3);
        assert_eq!(parse_leading_int("12abc"), 12);
        assert_eq!(parse_leading_int("1.9"), 1);
        assert_eq!(parse_leading_int("abc"), 0);
        assert_eq!(parse_leading_int("-"), 0);
        assert_eq!(parse_leading_int("99999999999999999999"), 0);
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(3723), "01:02:03");
        assert_eq!(format_hms(600), "00:10:00");
        assert_eq!(format_hms(-65), "-00:01:05");
        assert_eq!(format_hms(360000), "100:00:00");
    }

    #[test]
    fn test_format_then_parse_matches() {
        for secs in [0, 59, 60, 3599, 3600, 86399] {
            assert_eq!(parse_duration_string(&format_hms(secs)), secs);
        }
    }
}
