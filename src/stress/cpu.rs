//! CPU stress sub-test
//!
//! Fans out one floating-point busy-loop worker per logical core on a
//! dedicated thread pool. Workers run until a shared deadline; a stop flag
//! plus the pool scope guarantee every worker has exited before the result
//! is assembled, so no compute thread outlives the sampling window.
//!
//! While the workers burn, the calling thread samples load average and
//! free memory once per second.

use crate::system::{load_values, ResourceSample, ResourceSampler};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Configuration for the CPU stress sub-test
#[derive(Debug, Clone)]
pub struct CpuStressConfig {
    /// Wall-clock length of the burn window
    pub duration: Duration,
    /// Number of busy-loop workers
    pub workers: usize,
    /// Spacing between monitor samples
    pub sample_interval: Duration,
}

impl Default for CpuStressConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_secs(10),
            workers: num_cpus::get(),
            sample_interval: Duration::from_secs(1),
        }
    }
}

/// Outcome of the CPU stress sub-test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CpuStressResult {
    /// Actual wall-clock duration in seconds
    pub duration_secs: f64,
    /// Worker count that ran
    pub workers: usize,
    /// Total busy-loop iterations across all workers
    pub iterations: u64,
    /// Highest 1-minute load observed during the window
    pub peak_load: f64,
    /// Mean 1-minute load over the window
    pub avg_load: f64,
    /// Raw per-second monitor samples
    pub samples: Vec<ResourceSample>,
    /// Set when the test could not run (e.g. pool creation failure)
    pub error: Option<String>,
}

impl CpuStressResult {
    fn failed(config: &CpuStressConfig, message: String) -> Self {
        Self {
            duration_secs: 0.0,
            workers: config.workers,
            iterations: 0,
            peak_load: 0.0,
            avg_load: 0.0,
            samples: Vec::new(),
            error: Some(message),
        }
    }
}

/// Run the CPU stress sub-test to completion.
///
/// Never panics and never returns early: the burn window always lasts
/// `config.duration` unless the pool itself cannot be built.
pub fn run_cpu_stress(config: &CpuStressConfig) -> CpuStressResult {
    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .thread_name(|i| format!("sysdiag-burn-{}", i))
        .build()
    {
        Ok(pool) => pool,
        Err(e) => {
            let err = crate::error::SysdiagError::ThreadPoolError(e.to_string());
            return CpuStressResult::failed(config, err.to_string());
        }
    };

    let stop = AtomicBool::new(false);
    let iterations = AtomicU64::new(0);
    let started = Instant::now();
    let deadline = started + config.duration;

    let mut sampler = ResourceSampler::new();
    let mut samples: Vec<ResourceSample> = Vec::new();

    tracing::info!(
        workers = config.workers,
        duration_secs = config.duration.as_secs(),
        "starting CPU burn"
    );

    pool.scope(|s| {
        for _ in 0..config.workers {
            let stop = &stop;
            let iterations = &iterations;
            s.spawn(move |_| {
                let mut acc = 0.0_f64;
                let mut local_iterations = 0_u64;

                while !stop.load(Ordering::Relaxed) && Instant::now() < deadline {
                    for k in 1..=100_000_u64 {
                        let x = k as f64;
                        acc += x.sqrt() * x.sin() * x.cos();
                    }
                    local_iterations += 1;
                }

                iterations.fetch_add(local_iterations, Ordering::Relaxed);
                std::hint::black_box(acc);
            });
        }

        // Monitor loop on the calling thread; workers own the pool threads.
        while Instant::now() < deadline {
            samples.push(sampler.sample(started));
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            std::thread::sleep(remaining.min(config.sample_interval));
        }

        stop.store(true, Ordering::Relaxed);
        // leaving the scope joins every worker
    });

    let loads = load_values(&samples);
    let peak_load = loads.iter().copied().fold(0.0_f64, f64::max);
    let avg_load = crate::analysis::mean(&loads);

    let result = CpuStressResult {
        duration_secs: started.elapsed().as_secs_f64(),
        workers: config.workers,
        iterations: iterations.load(Ordering::Relaxed),
        peak_load,
        avg_load,
        samples,
        error: None,
    };

    tracing::info!(
        iterations = result.iterations,
        peak_load = result.peak_load,
        "CPU burn finished"
    );

    result
}
