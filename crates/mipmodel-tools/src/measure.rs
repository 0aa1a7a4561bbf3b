//! Per-stage wall-clock and memory measurements.

use std::time::{Duration, Instant};

use crate::memory::{capture_rss_bytes, rss_delta};

/// Measurement of one named stage.
#[derive(Debug, Clone)]
pub struct StageMeasurement {
    pub stage: String,
    pub duration: Duration,
    pub rss_before_bytes: Option<u64>,
    pub rss_after_bytes: Option<u64>,
    pub rss_delta_bytes: Option<i64>,
}

/// Handle returned by [`MeasurementRecorder::begin_stage`].
#[derive(Debug)]
#[must_use = "pass the handle to end_stage"]
pub struct StageStart {
    stage: String,
    started: Instant,
    rss_before_bytes: Option<u64>,
}

/// Records stages in the order they end.
#[derive(Debug, Default)]
pub struct MeasurementRecorder {
    stages: Vec<StageMeasurement>,
    track_memory: bool,
}

impl MeasurementRecorder {
    /// Recorder that samples RSS around every stage.
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            track_memory: true,
        }
    }

    /// Recorder that only measures durations.
    pub fn without_memory() -> Self {
        Self::default()
    }

    pub fn begin_stage(&self, stage: &str) -> StageStart {
        let rss_before_bytes = if self.track_memory {
            capture_rss_bytes(stage)
        } else {
            None
        };
        StageStart {
            stage: stage.to_string(),
            started: Instant::now(),
            rss_before_bytes,
        }
    }

    pub fn end_stage(&mut self, start: StageStart) -> &StageMeasurement {
        let duration = start.started.elapsed();
        let rss_after_bytes = if self.track_memory {
            capture_rss_bytes(&start.stage)
        } else {
            None
        };

        tracing::trace!(
            component = "measure",
            operation = "end_stage",
            status = "success",
            stage = %start.stage,
            duration_ms = duration.as_secs_f64() * 1000.0,
            "Stage finished"
        );

        let index = self.stages.len();
        self.stages.push(StageMeasurement {
            stage: start.stage,
            duration,
            rss_before_bytes: start.rss_before_bytes,
            rss_after_bytes,
            rss_delta_bytes: rss_delta(start.rss_before_bytes, rss_after_bytes),
        });
        &self.stages[index]
    }

    pub fn stages(&self) -> &[StageMeasurement] {
        &self.stages
    }

    /// Sum of all recorded stage durations.
    pub fn total_duration(&self) -> Duration {
        self.stages.iter().map(|stage| stage.duration).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_are_recorded_in_order() {
        let mut recorder = MeasurementRecorder::without_memory();
        let first = recorder.begin_stage("variables");
        recorder.end_stage(first);
        let second = recorder.begin_stage("copy");
        let measured = recorder.end_stage(second);
        assert_eq!(measured.stage, "copy");
        assert!(measured.rss_delta_bytes.is_none());

        let names: Vec<&str> = recorder
            .stages()
            .iter()
            .map(|stage| stage.stage.as_str())
            .collect();
        assert_eq!(names, vec!["variables", "copy"]);
        assert!(recorder.total_duration() >= recorder.stages()[0].duration);
    }

    #[test]
    fn test_memory_tracking_fills_rss() {
        let mut recorder = MeasurementRecorder::new();
        let start = recorder.begin_stage("terms");
        let measured = recorder.end_stage(start);
        assert!(measured.rss_before_bytes.is_some());
        assert!(measured.rss_delta_bytes.is_some());
    }
}
