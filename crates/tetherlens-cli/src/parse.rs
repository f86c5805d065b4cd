//! Argument value parsers.

use chrono::{NaiveDateTime, TimeZone};
use tetherlens_codec::text_hex;
use tetherlens_proto::ResultLimit;

/// Layout of the date-time picker.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a time bound: Unix seconds, or `YYYY-MM-DD HH:MM:SS` local time.
pub fn parse_time(s: &str) -> Result<i64, String> {
    parse_time_in(s, &chrono::Local)
}

/// [`parse_time`] with date-times read in `tz`.
pub fn parse_time_in<Tz: TimeZone>(s: &str, tz: &Tz) -> Result<i64, String> {
    let s = s.trim();
    if let Ok(seconds) = s.parse::<i64>() {
        return Ok(seconds);
    }

    let naive = NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).map_err(|e| {
        format!(
            "'{}' is neither Unix seconds nor YYYY-MM-DD HH:MM:SS ({})",
            s, e
        )
    })?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp())
        .ok_or_else(|| format!("'{}' does not exist in the local time zone", s))
}

/// Parse a result limit; only 10, 20 and 50 are accepted.
pub fn parse_limit(s: &str) -> Result<ResultLimit, String> {
    let n: u32 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    ResultLimit::try_from(n).map_err(|e| e.to_string())
}

/// Parse a hex pair separator; hex digits and `x` are refused.
pub fn parse_separator(s: &str) -> Result<char, String> {
    let mut chars = s.chars();
    let sep = match (chars.next(), chars.next()) {
        (Some(sep), None) => sep,
        _ => return Err(format!("separator '{}' must be a single character", s)),
    };
    text_hex::check_separator(sep).map_err(|e| e.to_string())?;
    Ok(sep)
}

/// Parse a `name:value` header.
pub fn parse_header(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("header '{}' must look like name:value", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("header '{}' has an empty name", s));
    }
    Ok((name.to_string(), value.trim().to_string()))
}
