//! Structured logging setup and per-evaluation JSON summary lines.

mod format;

pub use format::{EvaluationLog, StructuredLogger};
