//! Host counter collection
//!
//! Reads CPU, memory, network, and basic OS information through sysinfo,
//! without spawning any external process. Every value is best-effort:
//! a counter the platform cannot provide becomes a sentinel, never an error.

use serde::{Deserialize, Serialize};
use sysinfo::System;

/// Sentinel used where the platform does not expose a value
pub const UNKNOWN: &str = "Unknown";

/// Basic OS and host identification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicInfo {
    /// OS name (e.g. "Ubuntu", "Windows", "Darwin")
    pub os_name: String,
    /// OS version string
    pub os_version: String,
    /// Kernel version
    pub kernel_version: String,
    /// Host name
    pub hostname: String,
    /// CPU architecture
    pub arch: String,
    /// Uptime in seconds
    pub uptime_secs: u64,
    /// Total physical memory in bytes
    pub total_memory: u64,
    /// Free memory in bytes at collection time
    pub free_memory: u64,
}

impl BasicInfo {
    /// Collect basic host information
    pub fn collect(sys: &System) -> Self {
        BasicInfo {
            os_name: System::name().unwrap_or_else(|| UNKNOWN.to_string()),
            os_version: System::os_version().unwrap_or_else(|| UNKNOWN.to_string()),
            kernel_version: System::kernel_version().unwrap_or_else(|| UNKNOWN.to_string()),
            hostname: System::host_name().unwrap_or_else(|| UNKNOWN.to_string()),
            arch: std::env::consts::ARCH.to_string(),
            uptime_secs: System::uptime(),
            total_memory: sys.total_memory(),
            free_memory: sys.free_memory(),
        }
    }

    /// Uptime rounded down to whole hours
    pub fn uptime_hours(&self) -> u64 {
        self.uptime_secs / 3600
    }
}

/// System load average (1/5/15 minutes)
///
/// All three values are 0.0 on platforms without a load average (Windows).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LoadAverage {
    /// 1-minute load average
    pub one: f64,
    /// 5-minute load average
    pub five: f64,
    /// 15-minute load average
    pub fifteen: f64,
}

impl LoadAverage {
    /// Read the current load average
    pub fn current() -> Self {
        let load = System::load_average();
        LoadAverage {
            one: load.one,
            five: load.five,
            fifteen: load.fifteen,
        }
    }
}

/// CPU usage measured over a short sampling window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuUsage {
    /// Aggregate usage across all cores, percent
    pub global_pct: f32,
    /// Per-core usage, percent
    pub per_core: Vec<f32>,
}

impl CpuUsage {
    /// Measure CPU usage over sysinfo's minimum refresh interval
    pub fn measure(sys: &mut System) -> Self {
        sys.refresh_cpu_usage();
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        sys.refresh_cpu_usage();

        CpuUsage {
            global_pct: sys.global_cpu_usage(),
            per_core: sys.cpus().iter().map(|c| c.cpu_usage()).collect(),
        }
    }
}

/// CPU identification and current state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuReport {
    /// CPU model name
    pub model: String,
    /// Vendor (Intel, AMD, ARM, etc.)
    pub vendor: String,
    /// Total number of logical CPUs
    pub logical_cores: usize,
    /// Number of physical cores
    pub physical_cores: usize,
    /// CPU frequency in MHz (if available)
    pub frequency_mhz: Option<u64>,
    /// Load average at collection time
    pub load_average: LoadAverage,
    /// Short-window usage measurement
    pub usage: CpuUsage,
    /// CPU stress test outcome, populated by the stress phase
    pub stress: Option<crate::stress::CpuStressResult>,
}

impl CpuReport {
    /// Collect CPU information
    pub fn collect(sys: &mut System) -> Self {
        let cpus = sys.cpus();

        let model = cpus
            .first()
            .map(|c| c.brand().to_string())
            .unwrap_or_else(|| UNKNOWN.to_string());

        let vendor = cpus
            .first()
            .map(|c| c.vendor_id().to_string())
            .unwrap_or_else(|| UNKNOWN.to_string());

        let frequency_mhz = cpus.first().map(|c| c.frequency());

        CpuReport {
            model,
            vendor,
            logical_cores: num_cpus::get(),
            physical_cores: num_cpus::get_physical(),
            frequency_mhz,
            load_average: LoadAverage::current(),
            usage: CpuUsage::measure(sys),
            stress: None,
        }
    }
}

/// Memory totals and usage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryReport {
    /// Total physical memory in bytes
    pub total: u64,
    /// Used memory in bytes
    pub used: u64,
    /// Free memory in bytes
    pub free: u64,
    /// Available memory in bytes (free + reclaimable)
    pub available: u64,
    /// Swap total in bytes
    pub swap_total: u64,
    /// Swap used in bytes
    pub swap_used: u64,
    /// Used memory as a percentage of total
    pub usage_percent: f64,
    /// Memory stress test outcome, populated by the stress phase
    pub stress: Option<crate::stress::MemoryStressResult>,
}

impl MemoryReport {
    /// Collect memory information
    pub fn collect(sys: &mut System) -> Self {
        sys.refresh_memory();

        let total = sys.total_memory();
        let used = sys.used_memory();
        let usage_percent = if total > 0 {
            (used as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MemoryReport {
            total,
            used,
            free: sys.free_memory(),
            available: sys.available_memory(),
            swap_total: sys.total_swap(),
            swap_used: sys.used_swap(),
            usage_percent,
            stress: None,
        }
    }

    /// Total memory in GiB
    pub fn total_gib(&self) -> f64 {
        self.total as f64 / (1u64 << 30) as f64
    }
}

/// One network interface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterfaceInfo {
    /// Interface name
    pub name: String,
    /// MAC address
    pub mac_address: String,
    /// Assigned addresses (IPv4 and IPv6, CIDR notation)
    pub addresses: Vec<String>,
    /// Total bytes received since boot
    pub total_received: u64,
    /// Total bytes transmitted since boot
    pub total_transmitted: u64,
}

/// Network interface listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkReport {
    /// All detected interfaces
    pub interfaces: Vec<InterfaceInfo>,
}

impl NetworkReport {
    /// Collect the network interface list
    pub fn collect() -> Self {
        use sysinfo::Networks;

        let networks = Networks::new_with_refreshed_list();

        let mut interfaces: Vec<InterfaceInfo> = networks
            .iter()
            .map(|(name, data)| InterfaceInfo {
                name: name.clone(),
                mac_address: data.mac_address().to_string(),
                addresses: data
                    .ip_networks()
                    .iter()
                    .map(|ip| ip.to_string())
                    .collect(),
                total_received: data.total_received(),
                total_transmitted: data.total_transmitted(),
            })
            .collect();

        interfaces.sort_by(|a, b| a.name.cmp(&b.name));

        NetworkReport { interfaces }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_info_collection() {
        let sys = System::new_all();
        let info = BasicInfo::collect(&sys);
        assert!(!info.arch.is_empty());
        assert!(info.total_memory > 0);
    }

    #[test]
    fn test_cpu_report_collection() {
        let mut sys = System::new_all();
        let cpu = CpuReport::collect(&mut sys);
        assert!(cpu.logical_cores > 0);
        assert!(cpu.physical_cores > 0);
        assert!(cpu.stress.is_none());
    }

    #[test]
    fn test_memory_usage_percent_bounds() {
        let mut sys = System::new_all();
        let mem = MemoryReport::collect(&mut sys);
        assert!(mem.total > 0);
        assert!(mem.usage_percent >= 0.0 && mem.usage_percent <= 100.0);
    }

    #[test]
    fn test_uptime_hours_rounds_down() {
        let sys = System::new_all();
        let mut info = BasicInfo::collect(&sys);
        info.uptime_secs = 7300;
        assert_eq!(info.uptime_hours(), 2);
    }

    #[test]
    fn test_network_collection_does_not_panic() {
        let report = NetworkReport::collect();
        for iface in &report.interfaces {
            assert!(!iface.name.is_empty());
        }
    }
}
