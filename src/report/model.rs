//! The per-run report structure
//!
//! One explicit record for everything a run probes and measures. Created
//! empty at run start, each category is filled exactly once by its owning
//! phase, then the whole structure is serialized and discarded.

use crate::analysis::{
    AdvisorInputs, LoadStabilityReport, MemoryStabilityReport, Recommendation,
};
use crate::stress::StorageSpeedResult;
use crate::system::{
    free_memory_values, load_values, BasicInfo, CpuReport, InventorySection, MemoryReport,
    NetworkReport, ResourceSample,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Storage category: raw platform inventory plus the optional speed test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageReport {
    /// Raw disk/volume listing from the platform inventory commands
    pub inventory: InventorySection,
    /// Speed test outcome, if the stress phase ran
    pub speed_test: Option<StorageSpeedResult>,
}

/// Performance category: the timed sampling window and its statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// Window length in milliseconds
    pub duration_ms: u64,
    /// Number of samples taken
    pub sample_count: usize,
    /// Raw samples
    pub samples: Vec<ResourceSample>,
    /// Mean 1-minute load over the window
    pub avg_load: f64,
    /// Free-memory stability over the window
    pub memory_stability: MemoryStabilityReport,
    /// Load stability over the window
    pub load_stability: LoadStabilityReport,
}

impl PerformanceReport {
    /// Build the performance category from a completed sampling window
    pub fn from_samples(samples: Vec<ResourceSample>, duration: Duration) -> Self {
        let loads = load_values(&samples);
        let memory = free_memory_values(&samples);

        PerformanceReport {
            duration_ms: duration.as_millis() as u64,
            sample_count: samples.len(),
            avg_load: crate::analysis::mean(&loads),
            memory_stability: MemoryStabilityReport::from_samples(&memory),
            load_stability: LoadStabilityReport::from_samples(&loads),
            samples,
        }
    }
}

/// The aggregated per-run record containing every probed and measured
/// category.
///
/// Every category key is always serialized; a phase that could not gather
/// real data leaves placeholder/error strings inside its category rather
/// than omitting the key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticReport {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// OS identity, architecture, uptime, memory totals
    pub basic_info: Option<BasicInfo>,
    /// CPU identification, usage, load, stress outcome
    pub cpu: Option<CpuReport>,
    /// Memory totals, usage, stress outcome
    pub memory: Option<MemoryReport>,
    /// Storage inventory and speed test
    pub storage: Option<StorageReport>,
    /// Raw GPU inventory
    pub gpu: Option<InventorySection>,
    /// Raw battery inventory
    pub battery: Option<InventorySection>,
    /// Raw display inventory
    pub display: Option<InventorySection>,
    /// Network interface listing
    pub network: Option<NetworkReport>,
    /// Raw thermal inventory
    pub thermal: Option<InventorySection>,
    /// Timed sampling window statistics
    pub performance: Option<PerformanceReport>,
    /// Advisories from the recommendation engine
    pub recommendations: Vec<Recommendation>,
}

impl DiagnosticReport {
    /// Empty report stamped with the run start time
    pub fn new(started_at: DateTime<Utc>) -> Self {
        DiagnosticReport {
            started_at,
            basic_info: None,
            cpu: None,
            memory: None,
            storage: None,
            gpu: None,
            battery: None,
            display: None,
            network: None,
            thermal: None,
            performance: None,
            recommendations: Vec::new(),
        }
    }

    /// Aggregate the values the recommendation rules evaluate against
    pub fn advisor_inputs(&self) -> AdvisorInputs {
        AdvisorInputs {
            cores: self
                .cpu
                .as_ref()
                .map(|c| c.logical_cores)
                .unwrap_or_default(),
            total_memory_gib: self
                .memory
                .as_ref()
                .map(|m| m.total_gib())
                .unwrap_or_default(),
            memory_usage_pct: self
                .memory
                .as_ref()
                .map(|m| m.usage_percent)
                .unwrap_or_default(),
            write_mbps: self
                .storage
                .as_ref()
                .and_then(|s| s.speed_test.as_ref())
                .filter(|t| t.error.is_none())
                .map(|t| t.write_mbps),
            avg_load: self.performance.as_ref().map(|p| p.avg_load),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_has_all_keys_in_json() {
        let report = DiagnosticReport::new(Utc::now());
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        let object = json.as_object().unwrap();

        for key in [
            "basic_info",
            "cpu",
            "memory",
            "storage",
            "gpu",
            "battery",
            "display",
            "network",
            "thermal",
            "performance",
            "recommendations",
        ] {
            assert!(object.contains_key(key), "missing key: {}", key);
        }
    }

    #[test]
    fn test_performance_report_from_samples() {
        let samples = vec![
            ResourceSample {
                elapsed_ms: 0,
                load_one: 1.0,
                free_memory: 1000,
                uptime_secs: 5,
            },
            ResourceSample {
                elapsed_ms: 1000,
                load_one: 3.0,
                free_memory: 1000,
                uptime_secs: 6,
            },
        ];

        let perf = PerformanceReport::from_samples(samples, Duration::from_secs(2));

        assert_eq!(perf.sample_count, 2);
        assert_eq!(perf.avg_load, 2.0);
        assert_eq!(perf.memory_stability.variance, 0.0);
        assert_eq!(perf.load_stability.variance, 1.0);
    }

    #[test]
    fn test_advisor_inputs_skip_failed_speed_test() {
        let mut report = DiagnosticReport::new(Utc::now());
        report.storage = Some(StorageReport {
            inventory: crate::system::InventorySection::unavailable("test", "none"),
            speed_test: Some(StorageSpeedResult {
                file_size_bytes: 0,
                write_mbps: 0.0,
                read_mbps: 0.0,
                write_ms: 0,
                read_ms: 0,
                error: Some("disk full".to_string()),
            }),
        });

        assert!(report.advisor_inputs().write_mbps.is_none());
    }
}
