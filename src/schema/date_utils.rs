//! Timestamp and date parsing for source table cells.
//!
//! Truncation to a calendar date is naive: an explicit UTC offset is parsed
//! and then ignored, so the date written in the source is the date used.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Formats tried when parsing timestamps and dates
#[derive(Debug, Clone)]
pub struct DateFormatConfig {
    /// Timestamp formats carrying a UTC offset
    pub offset_formats: Vec<String>,
    /// Timestamp formats without an offset
    pub datetime_formats: Vec<String>,
    /// Date-only formats
    pub date_formats: Vec<String>,
    /// Enable heuristic format detection for date-only values
    pub enable_format_detection: bool,
}

impl Default for DateFormatConfig {
    fn default() -> Self {
        Self {
            offset_formats: vec![
                "%Y-%m-%d %H:%M:%S%.f%:z".to_string(),
                "%Y-%m-%d %H:%M:%S%.f%z".to_string(),
                "%Y-%m-%dT%H:%M:%S%.f%z".to_string(),
            ],
            datetime_formats: vec![
                "%Y-%m-%dT%H:%M:%S%.f".to_string(),
                "%Y-%m-%d %H:%M:%S%.f".to_string(),
                "%Y-%m-%dT%H:%M".to_string(),
                "%Y-%m-%d %H:%M".to_string(),
            ],
            date_formats: vec![
                "%Y-%m-%d".to_string(), // ISO format: 2023-01-15
                "%Y/%m/%d".to_string(), // 2023/01/15
                "%d.%m.%Y".to_string(), // 15.01.2023
                "%Y%m%d".to_string(),   // Compact: 20230115
            ],
            enable_format_detection: true,
        }
    }
}

/// Parse a timestamp cell into a naive wall-clock timestamp
///
/// Date-only values are placed at midnight.
#[must_use]
pub fn parse_timestamp(s: &str, config: &DateFormatConfig) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    for format in &config.offset_formats {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Some(dt.naive_local());
        }
    }

    for format in &config.datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }

    parse_date_string(s, config).and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parse a cell into the calendar date it falls on
#[must_use]
pub fn parse_calendar_date(s: &str, config: &DateFormatConfig) -> Option<NaiveDate> {
    parse_timestamp(s, config).map(|ts| ts.date())
}

/// Parse a date-only string with multiple format attempts
#[must_use]
pub fn parse_date_string(s: &str, config: &DateFormatConfig) -> Option<NaiveDate> {
    for format in &config.date_formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    if config.enable_format_detection {
        if let Some(detected_format) = detect_date_format(s) {
            if let Ok(date) = NaiveDate::parse_from_str(s, detected_format) {
                return Some(date);
            }
        }
    }

    None
}

/// Try to detect a date-only format from string patterns
#[must_use]
pub fn detect_date_format(s: &str) -> Option<&'static str> {
    if s.contains('/') {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() == 3 && parts[2].len() == 4 {
            if let Ok(first_num) = parts[0].parse::<u8>() {
                // Day-first only when the first part cannot be a month
                return Some(if first_num > 12 { "%d/%m/%Y" } else { "%m/%d/%Y" });
            }
        }
    }

    if s.contains('-') {
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() == 3 && parts[2].len() == 4 {
            return Some("%d-%m-%Y");
        }
    }

    None
}
