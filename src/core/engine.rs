//! Diagnostic engine
//!
//! Drives the whole run as a linear sequence of phases. Each phase runs
//! to completion before the next starts and records its own failures
//! inside its report category; only an error escaping every phase-local
//! handler aborts the run.

use crate::analysis::Advisor;
use crate::config::DiagConfig;
use crate::error::Result;
use crate::progress::PhaseProgress;
use crate::report::{DiagnosticReport, PerformanceReport, StorageReport};
use crate::stress::{
    run_cpu_stress, run_memory_stress, CpuStressConfig, MemoryStressConfig, StorageSpeedTest,
};
use crate::system::{
    provider_for_host, BasicInfo, CpuReport, MemoryReport, NetworkReport, ResourceSampler,
};
use chrono::Utc;
use std::time::{Duration, Instant};
use sysinfo::System;

/// Samples taken by the performance phase
const PERF_SAMPLES: usize = 5;

/// Spacing between performance samples
const PERF_INTERVAL: Duration = Duration::from_secs(1);

/// Runs the sequential diagnostic phases and assembles the report
pub struct DiagnosticEngine {
    config: DiagConfig,
    progress: PhaseProgress,
}

impl DiagnosticEngine {
    /// Create an engine for the given configuration
    pub fn new(config: DiagConfig) -> Self {
        Self {
            config,
            progress: PhaseProgress::disabled(),
        }
    }

    /// Attach a progress reporter
    pub fn with_progress(mut self, progress: PhaseProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Execute all phases in order and return the completed report.
    ///
    /// Phase-local failures degrade their category only; an `Err` here
    /// means the run as a whole could not continue.
    pub fn execute(&self) -> Result<DiagnosticReport> {
        let started_at = Utc::now();
        let mut report = DiagnosticReport::new(started_at);

        let mut sys = System::new_all();
        sys.refresh_all();

        let inventory = provider_for_host();
        tracing::info!(os_family = inventory.os_family(), "diagnostic run starting");

        // Phase 1: basic system information
        self.progress.begin("Gathering basic system information...");
        report.basic_info = Some(BasicInfo::collect(&sys));
        self.progress.done("Basic info collected");

        // Phase 2: CPU probe and stress test
        self.progress.begin("Analyzing CPU...");
        let mut cpu = CpuReport::collect(&mut sys);
        if self.config.run_stress {
            self.progress.begin(&format!(
                "Running CPU stress test ({} s burn)...",
                self.config.stress_duration.as_secs()
            ));
            cpu.stress = Some(run_cpu_stress(&CpuStressConfig {
                duration: self.config.stress_duration,
                workers: self.config.workers,
                ..CpuStressConfig::default()
            }));
        }
        report.cpu = Some(cpu);
        self.progress.done("CPU analysis completed");

        // Phase 3: memory probe and stress test
        self.progress.begin("Analyzing memory...");
        let mut memory = MemoryReport::collect(&mut sys);
        if self.config.run_stress {
            self.progress.begin("Running memory stress test...");
            memory.stress = Some(run_memory_stress(&MemoryStressConfig::default()));
        }
        report.memory = Some(memory);
        self.progress.done("Memory analysis completed");

        // Phase 4: storage inventory and speed test
        self.progress.begin("Analyzing storage...");
        let speed_test = if self.config.run_stress {
            self.progress.begin("Running storage speed test...");
            Some(StorageSpeedTest::new(&self.config.output_dir).run())
        } else {
            None
        };
        report.storage = Some(StorageReport {
            inventory: inventory.storage(),
            speed_test,
        });
        self.progress.done("Storage analysis completed");

        // Phase 5: GPU inventory
        self.progress.begin("Analyzing GPU...");
        report.gpu = Some(inventory.gpu());
        self.progress.done("GPU analysis completed");

        // Phase 6: battery inventory
        self.progress.begin("Analyzing battery...");
        report.battery = Some(inventory.battery());
        self.progress.done("Battery analysis completed");

        // Phase 7: display inventory
        self.progress.begin("Analyzing display...");
        report.display = Some(inventory.display());
        self.progress.done("Display analysis completed");

        // Phase 8: network interfaces
        self.progress.begin("Analyzing network interfaces...");
        report.network = Some(NetworkReport::collect());
        self.progress.done("Network analysis completed");

        // Phase 9: thermal sensors
        self.progress.begin("Checking thermal status...");
        report.thermal = Some(inventory.thermal());
        self.progress.done("Thermal analysis completed");

        // Phase 10: timed performance window
        self.progress.begin("Analyzing overall performance...");
        let window_start = Instant::now();
        let samples = ResourceSampler::new().collect_window(PERF_SAMPLES, PERF_INTERVAL);
        report.performance = Some(PerformanceReport::from_samples(
            samples,
            window_start.elapsed(),
        ));
        self.progress.done("Performance analysis completed");

        // Final step: recommendations over the aggregated values
        self.progress.begin("Generating recommendations...");
        report.recommendations = Advisor::new(report.advisor_inputs()).analyze();
        self.progress.done("Recommendations generated");

        self.progress.finish();
        tracing::info!("diagnostic run finished");

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn fast_config(dir: PathBuf) -> DiagConfig {
        DiagConfig {
            stress_duration: Duration::from_millis(200),
            workers: 1,
            run_stress: true,
            output_dir: dir,
            write_report: true,
            quiet: true,
        }
    }

    #[test]
    fn test_full_run_populates_every_category() {
        let dir = TempDir::new().unwrap();
        let engine = DiagnosticEngine::new(fast_config(dir.path().to_path_buf()));

        let report = engine.execute().unwrap();

        assert!(report.basic_info.is_some());
        assert!(report.cpu.is_some());
        assert!(report.memory.is_some());
        assert!(report.storage.is_some());
        assert!(report.gpu.is_some());
        assert!(report.battery.is_some());
        assert!(report.display.is_some());
        assert!(report.network.is_some());
        assert!(report.thermal.is_some());
        assert!(report.performance.is_some());
        assert!(!report.recommendations.is_empty());

        let cpu = report.cpu.as_ref().unwrap();
        assert!(cpu.stress.is_some());
        let memory = report.memory.as_ref().unwrap();
        assert!(memory.stress.is_some());
    }

    #[test]
    fn test_skip_stress_leaves_stress_fields_empty() {
        let dir = TempDir::new().unwrap();
        let mut config = fast_config(dir.path().to_path_buf());
        config.run_stress = false;

        let report = DiagnosticEngine::new(config).execute().unwrap();

        assert!(report.cpu.as_ref().unwrap().stress.is_none());
        assert!(report.memory.as_ref().unwrap().stress.is_none());
        assert!(report.storage.as_ref().unwrap().speed_test.is_none());
        // Inventory and recommendations still run.
        assert!(!report.recommendations.is_empty());
    }

    #[test]
    fn test_report_round_trips_through_json() {
        let dir = TempDir::new().unwrap();
        let mut config = fast_config(dir.path().to_path_buf());
        config.run_stress = false;

        let report = DiagnosticEngine::new(config).execute().unwrap();
        let path = crate::report::save_report(&report, dir.path()).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: DiagnosticReport = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            parsed.started_at.timestamp_millis(),
            report.started_at.timestamp_millis()
        );
    }
}
