//! Result Emitter: one JSON object per line.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::rolling::MinuteAverage;

/// Output timestamp layout (minute-truncated, seconds always `00`).
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Wire form of a [`MinuteAverage`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub timestamp: String,
    pub average_delivery_time: f32,
}

impl From<&MinuteAverage> for OutputRecord {
    fn from(m: &MinuteAverage) -> Self {
        Self {
            timestamp: format_minute(m.minute),
            average_delivery_time: m.average,
        }
    }
}

pub fn format_minute(minute: NaiveDateTime) -> String {
    minute.format(OUTPUT_TIMESTAMP_FORMAT).to_string()
}

pub fn parse_minute(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, OUTPUT_TIMESTAMP_FORMAT)
}

/// Writes records to `W` in call order.
#[derive(Debug)]
pub struct ResultEmitter<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> ResultEmitter<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    pub fn emit(&mut self, record: &MinuteAverage) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.out, &OutputRecord::from(record))?;
        self.out.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and hand back the writer.
    pub fn finish(mut self) -> std::io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
