//! Sample statistics and stability classification
//!
//! Arithmetic mean and population variance over small in-memory sample
//! sequences, plus the fixed-threshold stability ratings derived from them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Memory is rated Stable below this free-memory variance (bytes²)
pub const MEMORY_VARIANCE_STABLE: f64 = 1_000_000_000.0;

/// Load is rated Stable below this load variance
pub const LOAD_VARIANCE_STABLE: f64 = 0.5;

/// Load is rated Moderate below this variance (and Stable-bound above)
pub const LOAD_VARIANCE_MODERATE: f64 = 1.0;

/// Arithmetic mean; 0.0 for an empty sequence
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (divides by N); 0.0 for an empty sequence.
///
/// Each term is a squared difference, so the result is never negative,
/// and it is exactly zero when all samples are identical.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    // The summed mean is not exact in floating point; identical samples
    // must still produce an exact zero.
    let first = values[0];
    if values.iter().all(|v| *v == first) {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Free-memory stability rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryStability {
    /// Free-memory variance below 1e9 bytes²
    Stable,
    /// Anything at or above the threshold
    Unstable,
}

impl MemoryStability {
    /// Classify a free-memory variance (bytes²)
    pub fn classify(variance: f64) -> Self {
        if variance < MEMORY_VARIANCE_STABLE {
            MemoryStability::Stable
        } else {
            MemoryStability::Unstable
        }
    }
}

impl fmt::Display for MemoryStability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemoryStability::Stable => write!(f, "Stable"),
            MemoryStability::Unstable => write!(f, "Unstable"),
        }
    }
}

/// Load stability rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadStability {
    /// Load variance below 0.5
    Stable,
    /// Load variance in [0.5, 1.0)
    Moderate,
    /// Load variance at or above 1.0
    #[serde(rename = "High Load")]
    HighLoad,
}

impl LoadStability {
    /// Classify a 1-minute-load variance
    pub fn classify(variance: f64) -> Self {
        if variance < LOAD_VARIANCE_STABLE {
            LoadStability::Stable
        } else if variance < LOAD_VARIANCE_MODERATE {
            LoadStability::Moderate
        } else {
            LoadStability::HighLoad
        }
    }
}

impl fmt::Display for LoadStability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadStability::Stable => write!(f, "Stable"),
            LoadStability::Moderate => write!(f, "Moderate"),
            LoadStability::HighLoad => write!(f, "High Load"),
        }
    }
}

/// Free-memory variance plus its rating
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStabilityReport {
    /// Population variance of the free-memory samples, bytes²
    pub variance: f64,
    /// Classification against the fixed threshold
    pub rating: MemoryStability,
}

impl MemoryStabilityReport {
    /// Analyze a sequence of free-memory samples (bytes)
    pub fn from_samples(values: &[f64]) -> Self {
        let variance = population_variance(values);
        Self {
            variance,
            rating: MemoryStability::classify(variance),
        }
    }
}

/// Load variance plus its rating
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadStabilityReport {
    /// Population variance of the 1-minute load samples
    pub variance: f64,
    /// Classification against the fixed thresholds
    pub rating: LoadStability,
}

impl LoadStabilityReport {
    /// Analyze a sequence of 1-minute load samples
    pub fn from_samples(values: &[f64]) -> Self {
        let variance = population_variance(values);
        Self {
            variance,
            rating: LoadStability::classify(variance),
        }
    }
}
