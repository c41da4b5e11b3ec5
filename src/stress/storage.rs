//! Storage speed sub-test
//!
//! Writes a fixed-size patterned buffer to a scratch file, syncs it, reads
//! it back, verifies the bytes match, and reports MB/s in each direction.
//! The scratch file has a fixed name and is removed before the sub-test
//! returns, on success and on failure alike.

use crate::error::{IoResultExt, Result, SysdiagError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Fixed scratch file name used inside the target directory
pub const SCRATCH_FILE_NAME: &str = "diagnostic_speed_test.tmp";

/// Default test buffer size: 10 MiB
pub const DEFAULT_TEST_SIZE: usize = 10 * 1024 * 1024;

/// Storage speed sub-test over a target directory
pub struct StorageSpeedTest {
    dir: PathBuf,
    size: usize,
}

/// Outcome of the storage speed sub-test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSpeedResult {
    /// Test buffer size in bytes
    pub file_size_bytes: u64,
    /// Sequential write speed in MB/s (including fsync)
    pub write_mbps: f64,
    /// Sequential read speed in MB/s
    pub read_mbps: f64,
    /// Write wall-clock time in milliseconds
    pub write_ms: u64,
    /// Read wall-clock time in milliseconds
    pub read_ms: u64,
    /// Set when the test failed; speed fields are zero in that case
    pub error: Option<String>,
}

impl StorageSpeedResult {
    fn failed(size: usize, err: &SysdiagError) -> Self {
        Self {
            file_size_bytes: size as u64,
            write_mbps: 0.0,
            read_mbps: 0.0,
            write_ms: 0,
            read_ms: 0,
            error: Some(err.to_string()),
        }
    }
}

impl StorageSpeedTest {
    /// Speed test writing into `dir` with the default 10 MiB buffer
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            size: DEFAULT_TEST_SIZE,
        }
    }

    /// Override the test buffer size
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Run the sub-test. Filesystem errors land in the result's `error`
    /// field; the scratch file is gone either way.
    pub fn run(&self) -> StorageSpeedResult {
        let path = self.dir.join(SCRATCH_FILE_NAME);
        let outcome = self.measure(&path);

        // The scratch file must not outlive the sub-test.
        let _ = std::fs::remove_file(&path);

        match outcome {
            Ok(result) => {
                tracing::info!(
                    write_mbps = result.write_mbps,
                    read_mbps = result.read_mbps,
                    "storage speed test finished"
                );
                result
            }
            Err(e) => {
                tracing::warn!(error = %e, "storage speed test failed");
                StorageSpeedResult::failed(self.size, &e)
            }
        }
    }

    fn measure(&self, path: &Path) -> Result<StorageSpeedResult> {
        let data: Vec<u8> = (0..self.size).map(|i| (i % 256) as u8).collect();

        let write_start = Instant::now();
        {
            let mut file = File::create(path).with_path(path)?;
            file.write_all(&data).with_path(path)?;
            file.sync_all().with_path(path)?;
        }
        let write_duration = write_start.elapsed();

        let read_start = Instant::now();
        let mut buffer = vec![0u8; self.size];
        {
            let mut file = File::open(path).with_path(path)?;
            file.read_exact(&mut buffer).with_path(path)?;
        }
        let read_duration = read_start.elapsed();

        if buffer != data {
            return Err(SysdiagError::StorageVerification {
                path: path.to_path_buf(),
            });
        }

        let megabytes = self.size as f64 / (1024.0 * 1024.0);

        Ok(StorageSpeedResult {
            file_size_bytes: self.size as u64,
            write_mbps: megabytes / write_duration.as_secs_f64(),
            read_mbps: megabytes / read_duration.as_secs_f64(),
            write_ms: write_duration.as_millis() as u64,
            read_ms: read_duration.as_millis() as u64,
            error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_at_contract_size() {
        let dir = TempDir::new().unwrap();
        let result = StorageSpeedTest::new(dir.path()).run();

        assert!(result.error.is_none(), "unexpected error: {:?}", result.error);
        assert_eq!(result.file_size_bytes, 10 * 1024 * 1024);
        assert!(result.write_mbps > 0.0);
        assert!(result.read_mbps > 0.0);
        assert!(!dir.path().join(SCRATCH_FILE_NAME).exists());
    }

    #[test]
    fn test_scratch_file_removed_on_success() {
        let dir = TempDir::new().unwrap();
        let result = StorageSpeedTest::new(dir.path()).with_size(64 * 1024).run();

        assert!(result.error.is_none());
        assert!(!dir.path().join(SCRATCH_FILE_NAME).exists());
    }

    #[test]
    fn test_failure_recorded_not_propagated() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("no-such-subdir");

        let result = StorageSpeedTest::new(&missing).with_size(4096).run();

        assert!(result.error.is_some());
        assert_eq!(result.write_mbps, 0.0);
        assert!(!missing.join(SCRATCH_FILE_NAME).exists());
    }
}
