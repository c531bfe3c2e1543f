//! Translation event records and timestamp handling.

use chrono::{NaiveDateTime, Timelike};
use serde::Deserialize;

/// Input timestamp layout; the fractional part is optional.
pub const EVENT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// One line of the input file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TranslationEvent {
    pub timestamp: String,
    pub translation_id: String,
    pub source_language: String,
    pub target_language: String,
    pub client_name: String,
    pub event_name: String,
    pub nr_words: u64,
    /// Delivery time in seconds.
    pub duration: f64,
}

/// What the aggregator sees of an event: its minute and its duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub minute: NaiveDateTime,
    pub duration: f64,
}

impl TranslationEvent {
    /// Parse the timestamp and truncate it to the containing minute.
    pub fn to_sample(&self) -> Result<Sample, chrono::ParseError> {
        let ts = parse_timestamp(&self.timestamp)?;
        Ok(Sample {
            minute: truncate_to_minute(ts),
            duration: self.duration,
        })
    }
}

pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s.trim(), EVENT_TIMESTAMP_FORMAT)
}

/// Drop seconds and sub-second precision.
pub fn truncate_to_minute(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_microsecond_timestamps() {
        let ts = parse_timestamp("2018-12-26 18:11:08.509654").unwrap();
        assert_eq!(ts.second(), 8);
        assert_eq!(ts.nanosecond(), 509_654_000);
    }

    #[test]
    fn fraction_is_optional() {
        let ts = parse_timestamp("2018-12-26 18:11:08").unwrap();
        assert_eq!(ts.minute(), 11);
        assert_eq!(ts.nanosecond(), 0);
    }

    #[test]
    fn truncation_keeps_the_minute() {
        let ts = parse_timestamp("2018-12-26 18:11:59.999999").unwrap();
        let m = truncate_to_minute(ts);
        assert_eq!(m, parse_timestamp("2018-12-26 18:11:00").unwrap());
    }

    #[test]
    fn garbage_timestamp_is_rejected() {
        assert!(parse_timestamp("yesterday").is_err());
        assert!(parse_timestamp("2018-12-26T18:11:08Z").is_err());
    }

    #[test]
    fn event_to_sample() {
        let ev: TranslationEvent = serde_json::from_str(
            r#"{"timestamp": "2018-12-26 18:12:37.768575","translation_id": "5aa5b2f39f7254a75aa4","source_language": "en","target_language": "fr","client_name": "airliberty","event_name": "translation_delivered","nr_words": 30, "duration": 31}"#,
        )
        .unwrap();
        let s = ev.to_sample().unwrap();
        assert_eq!(s.minute, parse_timestamp("2018-12-26 18:12:00").unwrap());
        assert_eq!(s.duration, 31.0);
    }
}
