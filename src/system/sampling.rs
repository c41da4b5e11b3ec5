//! Timed resource sampling
//!
//! Shared by the CPU stress monitor (one sample per second during the burn
//! window) and the performance phase (five samples at one-second intervals).

use super::LoadAverage;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use sysinfo::{MemoryRefreshKind, RefreshKind, System};

/// One point-in-time reading of load and free memory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSample {
    /// Milliseconds since the sampling window opened
    pub elapsed_ms: u64,
    /// 1-minute load average (0.0 where unsupported)
    pub load_one: f64,
    /// Free memory in bytes
    pub free_memory: u64,
    /// Host uptime in seconds
    pub uptime_secs: u64,
}

/// Collects `ResourceSample`s against a fixed start instant
pub struct ResourceSampler {
    sys: System,
}

impl ResourceSampler {
    /// Create a sampler with memory refreshing enabled
    pub fn new() -> Self {
        let sys = System::new_with_specifics(
            RefreshKind::new().with_memory(MemoryRefreshKind::everything()),
        );
        Self { sys }
    }

    /// Take one sample relative to `started`
    pub fn sample(&mut self, started: Instant) -> ResourceSample {
        self.sys.refresh_memory();
        ResourceSample {
            elapsed_ms: started.elapsed().as_millis() as u64,
            load_one: LoadAverage::current().one,
            free_memory: self.sys.free_memory(),
            uptime_secs: System::uptime(),
        }
    }

    /// Current free memory in bytes
    pub fn free_memory(&mut self) -> u64 {
        self.sys.refresh_memory();
        self.sys.free_memory()
    }

    /// Take `count` samples spaced `interval` apart.
    ///
    /// Blocks for roughly `(count - 1) * interval`.
    pub fn collect_window(&mut self, count: usize, interval: Duration) -> Vec<ResourceSample> {
        let started = Instant::now();
        let mut samples = Vec::with_capacity(count);

        for i in 0..count {
            samples.push(self.sample(started));
            if i + 1 < count {
                std::thread::sleep(interval);
            }
        }

        samples
    }
}

impl Default for ResourceSampler {
    fn default() -> Self {
        Self::new()
    }
}

/// 1-minute load values of a sample run
pub fn load_values(samples: &[ResourceSample]) -> Vec<f64> {
    samples.iter().map(|s| s.load_one).collect()
}

/// Free-memory values of a sample run, in bytes as f64
pub fn free_memory_values(samples: &[ResourceSample]) -> Vec<f64> {
    samples.iter().map(|s| s.free_memory as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_sample_count_and_ordering() {
        let mut sampler = ResourceSampler::new();
        let samples = sampler.collect_window(3, Duration::from_millis(10));

        assert_eq!(samples.len(), 3);
        for pair in samples.windows(2) {
            assert!(pair[0].elapsed_ms <= pair[1].elapsed_ms);
        }
    }

    #[test]
    fn test_sample_values_are_sane() {
        let mut sampler = ResourceSampler::new();
        let sample = sampler.sample(Instant::now());

        assert!(sample.load_one >= 0.0);
        assert!(sample.load_one.is_finite());
    }

    #[test]
    fn test_value_extraction() {
        let samples = vec![
            ResourceSample {
                elapsed_ms: 0,
                load_one: 1.5,
                free_memory: 100,
                uptime_secs: 10,
            },
            ResourceSample {
                elapsed_ms: 1000,
                load_one: 2.5,
                free_memory: 200,
                uptime_secs: 11,
            },
        ];

        assert_eq!(load_values(&samples), vec![1.5, 2.5]);
        assert_eq!(free_memory_values(&samples), vec![100.0, 200.0]);
    }
}
