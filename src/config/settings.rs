//! Configuration settings for Sysdiag
//!
//! Defines all configuration options, CLI arguments, and defaults
//! for the diagnostic run.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default wall-clock duration of the CPU stress window in seconds
pub const DEFAULT_STRESS_SECS: u64 = 10;

/// Sysdiag - hardware diagnostics and stress testing utility
#[derive(Parser, Debug, Clone)]
#[command(name = "sysdiag")]
#[command(author = "Sysdiag Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Comprehensive laptop/workstation hardware diagnostics")]
#[command(long_about = r#"
Sysdiag probes the local host's hardware and OS state (CPU, memory, storage,
GPU, battery, display, network, thermal), runs short synthetic stress tests,
and writes a full JSON report next to a console summary.

Run with no arguments to perform the complete diagnostic:

  sysdiag                        # full run, report in the current directory
  sysdiag --skip-stress          # inventory and probes only
  sysdiag --stress-duration 30   # longer CPU burn window
  sysdiag -o /tmp                # write the report elsewhere
"#)]
pub struct CliArgs {
    /// CPU stress test duration in seconds
    #[arg(long, default_value_t = DEFAULT_STRESS_SECS, value_name = "SECS")]
    pub stress_duration: u64,

    /// Number of CPU stress workers (0 = one per logical core)
    #[arg(short = 'w', long, default_value = "0", value_name = "NUM")]
    pub workers: usize,

    /// Skip all stress sub-tests (CPU burn, memory allocation, disk speed)
    #[arg(long)]
    pub skip_stress: bool,

    /// Directory the JSON report (and the disk-speed scratch file) is written to
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Do not write the JSON report file
    #[arg(long)]
    pub no_report: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress progress lines and the summary block)
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

/// Runtime configuration for a diagnostic run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagConfig {
    /// CPU stress window length
    pub stress_duration: Duration,
    /// CPU stress worker count
    pub workers: usize,
    /// Whether stress sub-tests run at all
    pub run_stress: bool,
    /// Where the report and scratch file land
    pub output_dir: PathBuf,
    /// Whether the JSON report file is written
    pub write_report: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for DiagConfig {
    fn default() -> Self {
        Self {
            stress_duration: Duration::from_secs(DEFAULT_STRESS_SECS),
            workers: num_cpus::get(),
            run_stress: true,
            output_dir: PathBuf::from("."),
            write_report: true,
            quiet: false,
        }
    }
}

impl DiagConfig {
    /// Build a configuration from parsed CLI arguments
    pub fn from_cli(args: &CliArgs) -> std::result::Result<Self, String> {
        if args.stress_duration == 0 {
            return Err("stress duration must be at least 1 second".to_string());
        }

        let workers = if args.workers == 0 {
            num_cpus::get()
        } else {
            args.workers
        };

        let output_dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            stress_duration: Duration::from_secs(args.stress_duration),
            workers,
            run_stress: !args.skip_stress,
            output_dir,
            write_report: !args.no_report,
            quiet: args.quiet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DiagConfig::default();
        assert_eq!(config.stress_duration, Duration::from_secs(10));
        assert!(config.run_stress);
        assert!(config.write_report);
        assert!(config.workers > 0);
    }

    #[test]
    fn test_from_cli_auto_workers() {
        let args = CliArgs::parse_from(["sysdiag"]);
        let config = DiagConfig::from_cli(&args).unwrap();
        assert_eq!(config.workers, num_cpus::get());
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_from_cli_rejects_zero_duration() {
        let args = CliArgs::parse_from(["sysdiag", "--stress-duration", "0"]);
        assert!(DiagConfig::from_cli(&args).is_err());
    }

    #[test]
    fn test_from_cli_skip_stress() {
        let args = CliArgs::parse_from(["sysdiag", "--skip-stress", "-o", "/tmp"]);
        let config = DiagConfig::from_cli(&args).unwrap();
        assert!(!config.run_stress);
        assert_eq!(config.output_dir, PathBuf::from("/tmp"));
    }
}
