//! Console summary block
//!
//! The fixed-format end-of-run summary: system line, CPU line, memory
//! line, optional storage-speed line, uptime line, recommendation list.

use super::DiagnosticReport;
use console::style;
use humansize::{format_size, BINARY};

const RULE: &str = "============================================================";

impl DiagnosticReport {
    /// Print the end-of-run summary block to stdout
    pub fn print_summary(&self) {
        println!();
        println!("{}", RULE);
        println!("{}", style(" SYSTEM DIAGNOSTIC SUMMARY").bold());
        println!("{}", RULE);
        println!();

        if let Some(info) = &self.basic_info {
            println!(
                "System:  {} {} (kernel {})",
                info.os_name, info.os_version, info.kernel_version
            );
        }

        if let Some(cpu) = &self.cpu {
            println!("CPU:     {} ({} cores)", cpu.model, cpu.logical_cores);
        }

        if let Some(memory) = &self.memory {
            println!(
                "Memory:  {} ({:.1}% used)",
                format_size(memory.total, BINARY),
                memory.usage_percent
            );
        }

        if let Some(speed) = self
            .storage
            .as_ref()
            .and_then(|s| s.speed_test.as_ref())
            .filter(|t| t.error.is_none())
        {
            println!(
                "Storage: write {:.1} MB/s, read {:.1} MB/s",
                speed.write_mbps, speed.read_mbps
            );
        }

        if let Some(info) = &self.basic_info {
            println!("Uptime:  {} hours", info.uptime_hours());
        }

        println!();
        println!("{}", style("Recommendations:").bold());
        for rec in &self.recommendations {
            println!("  {} {}", rec.severity.marker(), rec.message);
        }

        println!();
        println!("{}", RULE);
    }
}
