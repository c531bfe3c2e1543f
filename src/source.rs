//! Event Source: lazily decodes one JSON event per input line.
//!
//! The iterator is single-pass and fuses on the first error, so the
//! pipeline never sees a record past a bad line.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::event::{Sample, TranslationEvent};

#[derive(Debug)]
pub struct EventSource<R> {
    reader: R,
    path: PathBuf,
    buf: String,
    line_no: usize,
    events: usize,
    failed: bool,
}

impl EventSource<BufReader<File>> {
    /// Open `path` for reading. Failure is reported before any record is produced.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file), path))
    }
}

impl<R: BufRead> EventSource<R> {
    /// Wrap an already-open reader; `path` is only used in diagnostics.
    pub fn new(reader: R, path: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            path: path.into(),
            buf: String::new(),
            line_no: 0,
            events: 0,
            failed: false,
        }
    }

    /// Lines consumed so far, blank ones included.
    pub fn lines_read(&self) -> usize {
        self.line_no
    }

    /// Events successfully decoded so far.
    pub fn events_read(&self) -> usize {
        self.events
    }

    fn decode(&self, line: &str) -> Result<Sample> {
        let ev: TranslationEvent = serde_json::from_str(line).map_err(|e| Error::Decode {
            line: self.line_no,
            reason: e.to_string(),
        })?;
        ev.to_sample().map_err(|e| Error::Decode {
            line: self.line_no,
            reason: format!("invalid timestamp {:?}: {e}", ev.timestamp),
        })
    }
}

impl<R: BufRead> Iterator for EventSource<R> {
    type Item = Result<Sample>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_no += 1;
                    let line = self.buf.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let decoded = self.decode(line);
                    match decoded {
                        Ok(_) => self.events += 1,
                        Err(_) => self.failed = true,
                    }
                    return Some(decoded);
                }
                Err(source) if source.kind() == io::ErrorKind::InvalidData => {
                    self.failed = true;
                    self.line_no += 1;
                    return Some(Err(Error::Decode {
                        line: self.line_no,
                        reason: source.to_string(),
                    }));
                }
                Err(source) => {
                    self.failed = true;
                    return Some(Err(Error::Io {
                        path: self.path.clone(),
                        source,
                    }));
                }
            }
        }
    }
}
