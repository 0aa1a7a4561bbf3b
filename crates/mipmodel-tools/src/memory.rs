//! Resident memory probes for model-building stages.

use std::time::Instant;
use sysinfo::System;
use thiserror::Error;

/// Resident memory of the current process at a named stage.
#[derive(Debug, Clone)]
pub struct MemorySnapshot {
    /// Resident set size in bytes
    pub rss_bytes: u64,
    pub timestamp: Instant,
    /// Name of the stage (e.g. "variables", "copy")
    pub stage: String,
}

/// Errors produced by memory instrumentation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("[MEMORY_PROCESS_NOT_FOUND] failed to locate process {pid}")]
    ProcessNotFound { pid: u32 },
}

impl MemoryError {
    pub fn code(&self) -> &'static str {
        match self {
            MemoryError::ProcessNotFound { .. } => "MEMORY_PROCESS_NOT_FOUND",
        }
    }
}

impl MemorySnapshot {
    /// Capture current memory state for a given stage.
    ///
    /// # Errors
    ///
    /// Returns an error if the current process cannot be located.
    pub fn capture(stage: &str) -> Result<Self, MemoryError> {
        let pid = sysinfo::Pid::from(std::process::id() as usize);

        let mut sys = System::new();
        sys.refresh_processes_specifics(
            sysinfo::ProcessesToUpdate::Some(&[pid]),
            true,
            sysinfo::ProcessRefreshKind::nothing().with_memory(),
        );

        let process = sys.process(pid).ok_or(MemoryError::ProcessNotFound {
            pid: std::process::id(),
        })?;

        Ok(MemorySnapshot {
            rss_bytes: process.memory(),
            timestamp: Instant::now(),
            stage: stage.to_string(),
        })
    }

    /// Growth in RSS bytes from `earlier` to this snapshot.
    pub fn diff(&self, earlier: &Self) -> i64 {
        self.rss_bytes as i64 - earlier.rss_bytes as i64
    }
}

/// RSS in bytes, or `None` when the process cannot be inspected.
pub fn capture_rss_bytes(stage: &str) -> Option<u64> {
    match MemorySnapshot::capture(stage) {
        Ok(snapshot) => Some(snapshot.rss_bytes),
        Err(err) => {
            tracing::debug!(
                component = "memory",
                operation = "capture",
                status = "error",
                code = err.code(),
                stage,
                "{err}"
            );
            None
        }
    }
}

pub fn rss_delta(before: Option<u64>, after: Option<u64>) -> Option<i64> {
    match (before, after) {
        (Some(before), Some(after)) => Some(after as i64 - before as i64),
        _ => None,
    }
}
