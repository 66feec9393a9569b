// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Breathline telemetry: the ambient sensor's append-only JSONL log.

pub mod reader;
pub mod record;
pub mod source;

pub use reader::TelemetryReader;
pub use record::{TelemetryRecord, KNOWN_CHANNELS};
pub use source::{FileSource, MemorySource, TelemetrySource};
