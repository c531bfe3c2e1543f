//! # Rolling Window
//! Per-minute sliding window over delivery durations.
//!
//! Samples are queued in arrival order (non-decreasing minute) and evicted
//! from the front once they are older than the window. A running sum is kept
//! alongside the queue so each minute's average costs amortized O(1).
//!
//! The window for a tick at `clock` is `[clock - window, clock]`, inclusive on
//! both ends: a sample exactly `window` minutes old still counts.

use chrono::{Duration, NaiveDateTime};
use std::collections::VecDeque;
use tracing::debug;

use crate::error::{Error, Result};
use crate::event::Sample;

/// One output record: the average over the window ending at `minute`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinuteAverage {
    pub minute: NaiveDateTime,
    pub average: f32,
}

/// Window state, owned by a single aggregation run.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    /// Retained samples, front = oldest.
    queue: VecDeque<Sample>,
    /// Sum of `duration` over `queue`.
    running_sum: f64,
    /// Next minute to tick; `None` until the first sample.
    clock: Option<NaiveDateTime>,
    /// Minute of the most recently observed sample.
    last_seen: Option<NaiveDateTime>,
    window: Duration,
}

impl SlidingWindow {
    /// Create an empty window spanning `window_minutes` trailing minutes.
    pub fn new(window_minutes: u32) -> Self {
        Self {
            queue: VecDeque::new(),
            running_sum: 0.0,
            clock: None,
            last_seen: None,
            window: Duration::minutes(i64::from(window_minutes)),
        }
    }

    /// Feed one sample, handing each tick to `on_tick` as soon as it is
    /// computed, for every minute from the current clock up to and including
    /// the sample's minute.
    ///
    /// Ticks are computed before the sample itself is inserted. A sample in
    /// a minute that has already ticked produces no ticks. If `on_tick`
    /// fails, the loop stops there and the sample is not inserted.
    pub fn observe_with<F>(&mut self, sample: Sample, mut on_tick: F) -> Result<()>
    where
        F: FnMut(MinuteAverage) -> Result<()>,
    {
        let t = sample.minute;
        if let Some(previous) = self.last_seen {
            if t < previous {
                return Err(Error::OutOfOrder {
                    previous,
                    current: t,
                });
            }
        }

        let mut clock = self.clock.unwrap_or(t);
        while clock <= t {
            self.evict_expired(clock);
            let tick = self.snapshot(clock);
            clock += Duration::minutes(1);
            self.clock = Some(clock);
            on_tick(tick)?;
        }

        self.last_seen = Some(t);
        self.queue.push_back(sample);
        self.running_sum += sample.duration;
        Ok(())
    }

    /// [`observe_with`](Self::observe_with), collecting the ticks.
    pub fn observe(&mut self, sample: Sample) -> Result<Vec<MinuteAverage>> {
        let mut ticks = Vec::new();
        self.observe_with(sample, |tick| {
            ticks.push(tick);
            Ok(())
        })?;
        Ok(ticks)
    }

    /// Final record after the input ends: the last ticked minute, with every
    /// sample observed since that tick included.
    ///
    /// Returns `None` when nothing was ever observed.
    pub fn flush(&self) -> Option<MinuteAverage> {
        self.clock.map(|next| self.snapshot(next - Duration::minutes(1)))
    }

    /// Current average over retained samples; `0` for an empty window.
    pub fn average(&self) -> f32 {
        if self.queue.is_empty() {
            0.0
        } else {
            (self.running_sum / self.queue.len() as f64) as f32
        }
    }

    pub fn running_sum(&self) -> f64 {
        self.running_sum
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Retained samples, oldest first.
    pub fn retained(&self) -> impl Iterator<Item = &Sample> {
        self.queue.iter()
    }

    /// Next minute that would tick, if any sample has been observed.
    pub fn clock(&self) -> Option<NaiveDateTime> {
        self.clock
    }

    fn evict_expired(&mut self, clock: NaiveDateTime) {
        let mut evicted = 0usize;
        while let Some(front) = self.queue.front() {
            if clock - front.minute > self.window {
                self.running_sum -= front.duration;
                self.queue.pop_front();
                evicted += 1;
            } else {
                break; // queue is ordered; everything behind is newer
            }
        }
        if self.queue.is_empty() {
            // drop accumulated float error once nothing is retained
            self.running_sum = 0.0;
        }
        if evicted > 0 {
            debug!(%clock, evicted, retained = self.queue.len(), "evicted expired samples");
        }
    }

    fn snapshot(&self, minute: NaiveDateTime) -> MinuteAverage {
        MinuteAverage {
            minute,
            average: self.average(),
        }
    }
}

/// Run a whole sample stream through a fresh window, flush included.
pub fn process<I>(samples: I, window_minutes: u32) -> Result<Vec<MinuteAverage>>
where
    I: IntoIterator<Item = Result<Sample>>,
{
    let mut window = SlidingWindow::new(window_minutes);
    let mut out = Vec::new();
    for sample in samples {
        window.observe_with(sample?, |tick| {
            out.push(tick);
            Ok(())
        })?;
    }
    out.extend(window.flush());
    Ok(out)
}
