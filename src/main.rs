//! Sysdiag CLI - host hardware diagnostics and stress testing
//!
//! Running with no arguments performs the full sequential diagnostic and
//! writes the JSON report into the current directory.

use anyhow::Context;
use clap::Parser;
use sysdiag::config::{CliArgs, DiagConfig};
use sysdiag::core::DiagnosticEngine;
use sysdiag::progress::PhaseProgress;
use sysdiag::report::save_report;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    // Parse CLI arguments
    let args = CliArgs::parse();

    // Handle result
    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: CliArgs) -> anyhow::Result<()> {
    let config = DiagConfig::from_cli(&args)
        .map_err(sysdiag::SysdiagError::ConfigError)
        .context("invalid arguments")?;

    if !config.quiet {
        println!("Starting full system diagnostic...");
        println!("This may take a minute.");
        println!();
    }

    let progress = if config.quiet {
        PhaseProgress::disabled()
    } else {
        PhaseProgress::new()
    };

    let run_start = std::time::Instant::now();
    let engine = DiagnosticEngine::new(config.clone()).with_progress(progress);
    let report = engine.execute().context("diagnostic run failed")?;

    if !config.quiet {
        report.print_summary();
    }

    if config.write_report {
        let path = save_report(&report, &config.output_dir).context("failed to write report")?;
        if !config.quiet {
            println!();
            println!("Full results available in: {}", path.display());
        }
    }

    if !config.quiet {
        let elapsed = std::time::Duration::from_secs(run_start.elapsed().as_secs());
        println!(
            "Diagnostic complete in {}.",
            humantime::format_duration(elapsed)
        );
    }

    Ok(())
}
