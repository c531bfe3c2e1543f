// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod config;
pub mod emit;
pub mod error;
pub mod event;
pub mod pipeline;
pub mod rolling;
pub mod source;

// ---- Re-exports for stable public API ----
pub use crate::config::{Cli, Config};
pub use crate::error::{Error, Result};
pub use crate::pipeline::{run, RunSummary};
pub use crate::rolling::{process, MinuteAverage, SlidingWindow};
