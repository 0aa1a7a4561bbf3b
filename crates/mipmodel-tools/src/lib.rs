//! Development tools for mipmodel.
//!
//! Logging setup driven by `MIPMODEL_*` environment variables, and stage
//! instrumentation (wall-clock and resident memory) used by the benchmark
//! runner.

pub mod logging;
pub mod measure;
pub mod memory;

pub use logging::{LogFormat, LoggingConfig, LoggingError, enable_logging};
pub use measure::{MeasurementRecorder, StageMeasurement, StageStart};
pub use memory::{MemoryError, MemorySnapshot, capture_rss_bytes, rss_delta};
