//! Recommendation engine
//!
//! A fixed, ordered list of threshold rules evaluated against the
//! aggregated diagnostic values. Each rule contributes at most one
//! advisory; when none fires, a single default advisory is emitted.

use serde::{Deserialize, Serialize};

/// Cores below this count trigger the multitasking advisory
pub const MIN_CORES: usize = 4;

/// Total memory below this (GiB) is flagged as insufficient
pub const LOW_MEMORY_GIB: f64 = 8.0;

/// Total memory at or above this (GiB) is called out as excellent
pub const HIGH_MEMORY_GIB: f64 = 16.0;

/// Memory usage above this percentage indicates pressure
pub const HIGH_MEMORY_USAGE_PCT: f64 = 80.0;

/// Write speeds below this (MB/s) suggest a spinning disk
pub const SLOW_WRITE_MBPS: f64 = 50.0;

/// Write speeds above this (MB/s) indicate SSD-class storage
pub const FAST_WRITE_MBPS: f64 = 200.0;

/// Average load above this indicates an overloaded system
pub const HIGH_AVG_LOAD: f64 = 2.0;

/// Category of an advisory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdviceCategory {
    /// CPU capability
    Cpu,
    /// Memory capacity or pressure
    Memory,
    /// Storage performance
    Storage,
    /// System load
    Load,
    /// Overall assessment
    General,
}

/// Severity of an advisory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdviceSeverity {
    /// A real capability shortfall
    Critical,
    /// Something worth watching
    Warning,
    /// A strength worth noting
    Good,
}

impl AdviceSeverity {
    /// Console marker used by the summary block
    pub fn marker(&self) -> &'static str {
        match self {
            AdviceSeverity::Critical => "[x]",
            AdviceSeverity::Warning => "[!]",
            AdviceSeverity::Good => "[+]",
        }
    }
}

/// One advisory produced by the rule list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// What the advisory is about
    pub category: AdviceCategory,
    /// How seriously to take it
    pub severity: AdviceSeverity,
    /// Human-readable advisory text
    pub message: String,
}

impl Recommendation {
    fn new(category: AdviceCategory, severity: AdviceSeverity, message: impl Into<String>) -> Self {
        Self {
            category,
            severity,
            message: message.into(),
        }
    }
}

/// Aggregated values the rules evaluate against
#[derive(Debug, Clone, Default)]
pub struct AdvisorInputs {
    /// Logical core count
    pub cores: usize,
    /// Total physical memory in GiB
    pub total_memory_gib: f64,
    /// Memory usage percentage at probe time
    pub memory_usage_pct: f64,
    /// Measured sequential write speed, if the storage test ran
    pub write_mbps: Option<f64>,
    /// Mean 1-minute load over the performance window, if sampled
    pub avg_load: Option<f64>,
}

/// Evaluates the fixed rule list against aggregated diagnostic values
pub struct Advisor {
    inputs: AdvisorInputs,
}

impl Advisor {
    /// Create an advisor over the aggregated values
    pub fn new(inputs: AdvisorInputs) -> Self {
        Self { inputs }
    }

    /// Run every rule in order and collect the advisories
    pub fn analyze(&self) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();

        if self.inputs.cores < MIN_CORES {
            recommendations.push(Recommendation::new(
                AdviceCategory::Cpu,
                AdviceSeverity::Critical,
                format!(
                    "CPU has fewer than {} cores and may struggle with modern multitasking",
                    MIN_CORES
                ),
            ));
        }

        if self.inputs.total_memory_gib < LOW_MEMORY_GIB {
            recommendations.push(Recommendation::new(
                AdviceCategory::Memory,
                AdviceSeverity::Critical,
                format!(
                    "Less than {} GiB RAM is insufficient for modern computing needs",
                    LOW_MEMORY_GIB as u64
                ),
            ));
        } else if self.inputs.total_memory_gib >= HIGH_MEMORY_GIB {
            recommendations.push(Recommendation::new(
                AdviceCategory::Memory,
                AdviceSeverity::Good,
                format!(
                    "{} GiB+ RAM is excellent for multitasking and demanding applications",
                    HIGH_MEMORY_GIB as u64
                ),
            ));
        }

        if self.inputs.memory_usage_pct > HIGH_MEMORY_USAGE_PCT {
            recommendations.push(Recommendation::new(
                AdviceCategory::Memory,
                AdviceSeverity::Warning,
                "High memory usage detected, the system may be under pressure",
            ));
        }

        if let Some(write_mbps) = self.inputs.write_mbps {
            if write_mbps < SLOW_WRITE_MBPS {
                recommendations.push(Recommendation::new(
                    AdviceCategory::Storage,
                    AdviceSeverity::Critical,
                    "Slow storage detected, consider an SSD upgrade",
                ));
            } else if write_mbps > FAST_WRITE_MBPS {
                recommendations.push(Recommendation::new(
                    AdviceCategory::Storage,
                    AdviceSeverity::Good,
                    "Fast storage detected, likely an SSD",
                ));
            }
        }

        if let Some(avg_load) = self.inputs.avg_load {
            if avg_load > HIGH_AVG_LOAD {
                recommendations.push(Recommendation::new(
                    AdviceCategory::Load,
                    AdviceSeverity::Warning,
                    "High system load detected, the system may be overloaded",
                ));
            }
        }

        if recommendations.is_empty() {
            recommendations.push(Recommendation::new(
                AdviceCategory::General,
                AdviceSeverity::Good,
                "No major issues detected, the system appears to be in good condition",
            ));
        }

        recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy_inputs() -> AdvisorInputs {
        AdvisorInputs {
            cores: 8,
            total_memory_gib: 10.0,
            memory_usage_pct: 40.0,
            write_mbps: Some(120.0),
            avg_load: Some(0.5),
        }
    }

    fn messages(inputs: AdvisorInputs) -> Vec<String> {
        Advisor::new(inputs)
            .analyze()
            .into_iter()
            .map(|r| r.message)
            .collect()
    }

    #[test]
    fn test_core_rule_boundary() {
        let mut inputs = healthy_inputs();
        inputs.cores = 3;
        assert!(messages(inputs).iter().any(|m| m.contains("fewer than 4 cores")));

        let mut inputs = healthy_inputs();
        inputs.cores = 4;
        assert!(!messages(inputs).iter().any(|m| m.contains("fewer than 4 cores")));
    }

    #[test]
    fn test_memory_rule_boundaries() {
        let mut inputs = healthy_inputs();
        inputs.total_memory_gib = 7.99;
        assert!(messages(inputs).iter().any(|m| m.contains("insufficient")));

        let mut inputs = healthy_inputs();
        inputs.total_memory_gib = 16.0;
        assert!(messages(inputs).iter().any(|m| m.contains("excellent")));

        let mut inputs = healthy_inputs();
        inputs.total_memory_gib = 10.0;
        let msgs = messages(inputs);
        assert!(!msgs.iter().any(|m| m.contains("insufficient")));
        assert!(!msgs.iter().any(|m| m.contains("excellent")));
    }

    #[test]
    fn test_memory_usage_rule() {
        let mut inputs = healthy_inputs();
        inputs.memory_usage_pct = 85.0;
        assert!(messages(inputs).iter().any(|m| m.contains("High memory usage")));
    }

    #[test]
    fn test_storage_rules() {
        let mut inputs = healthy_inputs();
        inputs.write_mbps = Some(30.0);
        assert!(messages(inputs).iter().any(|m| m.contains("Slow storage")));

        let mut inputs = healthy_inputs();
        inputs.write_mbps = Some(450.0);
        assert!(messages(inputs).iter().any(|m| m.contains("Fast storage")));

        // No measurement, no storage advisory either way.
        let mut inputs = healthy_inputs();
        inputs.write_mbps = None;
        let msgs = messages(inputs);
        assert!(!msgs.iter().any(|m| m.contains("storage")));
    }

    #[test]
    fn test_load_rule() {
        let mut inputs = healthy_inputs();
        inputs.avg_load = Some(2.5);
        assert!(messages(inputs).iter().any(|m| m.contains("overloaded")));
    }

    #[test]
    fn test_default_advisory_when_nothing_fires() {
        let msgs = messages(healthy_inputs());
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].contains("No major issues"));
    }

    #[test]
    fn test_rules_fire_independently() {
        let inputs = AdvisorInputs {
            cores: 2,
            total_memory_gib: 4.0,
            memory_usage_pct: 90.0,
            write_mbps: Some(20.0),
            avg_load: Some(3.0),
        };
        let recs = Advisor::new(inputs).analyze();
        assert_eq!(recs.len(), 5);
    }
}
