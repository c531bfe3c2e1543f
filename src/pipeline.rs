//! Event Source → Sliding Window → Result Emitter, in one pass.

use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::config::Config;
use crate::emit::ResultEmitter;
use crate::error::Result;
use crate::rolling::SlidingWindow;
use crate::source::EventSource;

/// Counters reported after a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub events: usize,
    pub records: usize,
}

/// Open the configured input file and stream every record to `out`.
pub fn run<W: Write>(config: &Config, out: W) -> Result<RunSummary> {
    let source = EventSource::open(&config.input_file)?;
    info!(
        input = %config.input_file.display(),
        window_minutes = config.window_minutes,
        "processing events"
    );
    run_source(source, config.window_minutes, out)
}

/// Same as [`run`] for an already-open reader.
pub fn run_reader<R: BufRead, W: Write>(
    reader: R,
    label: &Path,
    window_minutes: u32,
    out: W,
) -> Result<RunSummary> {
    run_source(EventSource::new(reader, label), window_minutes, out)
}

fn run_source<R: BufRead, W: Write>(
    mut source: EventSource<R>,
    window_minutes: u32,
    out: W,
) -> Result<RunSummary> {
    let mut window = SlidingWindow::new(window_minutes);
    let mut emitter = ResultEmitter::new(out);

    // Ticks go out as soon as they exist; a later failure leaves them valid.
    for sample in source.by_ref() {
        window.observe_with(sample?, |tick| Ok(emitter.emit(&tick)?))?;
    }
    match window.flush() {
        Some(last) => emitter.emit(&last)?,
        None => debug!("no events in input, nothing to flush"),
    }

    let summary = RunSummary {
        events: source.events_read(),
        records: emitter.written(),
    };
    emitter.finish()?;
    info!(
        events = summary.events,
        records = summary.records,
        lines = source.lines_read(),
        "run complete"
    );
    Ok(summary)
}
