use std::ops::Index;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;

fn to_int<T: std::str::FromStr>(num_str: &str, date_str: &str) -> Result<T, String> {
    match num_str.parse::<T>() {
        Ok(x) => Ok(x),
        Err(_) => Err(format!("Error parsing {} from the date {}", num_str, date_str)),
    }
}

/// Parses the frontmatter date. Accepts an ISO-style string with an optional
/// time part: "2024-01-02", "2024-01-02T03:04:05" or "2024-01-02 03:04:05Z".
pub fn parse_iso_date(buf: &str) -> Result<NaiveDateTime, String> {
    lazy_static! {
        static ref DATE_REGEX: Regex = Regex::new(
            r"^(\d{4})-(\d{1,2})-(\d{1,2})([T ](\d{1,2}):(\d{1,2})(:(\d{1,2}))?(\.\d+)?Z?)?$"
        ).unwrap();
    }

    let Some(caps) = DATE_REGEX.captures(buf.trim()) else {
        return Err(format!("Unable to parse date {}", buf));
    };

    let to_i32 = |num_str: &str| to_int::<i32>(num_str, buf);
    let to_u32 = |num_str: &str| to_int::<u32>(num_str, buf);

    let y: i32 = to_i32(caps.index(1))?;
    let m: u32 = to_u32(caps.index(2))?;
    let d: u32 = to_u32(caps.index(3))?;

    let (h, mn, s) = if caps.get(4).is_some() {
        let h: u32 = to_u32(caps.index(5))?;
        let mn: u32 = to_u32(caps.index(6))?;
        let s: u32 = match caps.get(8) {
            Some(sec) => to_u32(sec.as_str())?,
            None => 0,
        };
        (h, mn, s)
    } else {
        (0, 0, 0)
    };

    let date = NaiveDate::from_ymd_opt(y, m, d)
        .ok_or(format!("Invalid calendar date {}", buf))?;
    let time = NaiveTime::from_hms_opt(h, mn, s)
        .ok_or(format!("Invalid time of day {}", buf))?;

    Ok(NaiveDateTime::new(date, time))
}

pub fn format_date(date_time: &NaiveDateTime) -> String {
    date_time.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let dt = parse_iso_date("2024-01-02").unwrap();
        assert_eq!(format_date(&dt), "2024-01-02");
        assert_eq!(dt.format("%H:%M:%S").to_string(), "00:00:00");
    }

    #[test]
    fn test_parse_date_time() {
        let dt = parse_iso_date("2024-01-02T03:04:05").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-01-02 03:04:05");

        let dt = parse_iso_date("2024-01-02 03:04:05.123Z").unwrap();
        assert_eq!(dt.format("%H:%M:%S").to_string(), "03:04:05");

        let dt = parse_iso_date("2024-01-02T03:04Z").unwrap();
        assert_eq!(dt.format("%H:%M:%S").to_string(), "03:04:00");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_iso_date("not a date").is_err());
        assert!(parse_iso_date("2024-13-40").is_err());
        assert!(parse_iso_date("").is_err());
    }
}
