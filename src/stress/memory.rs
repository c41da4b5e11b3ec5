//! Memory stress sub-test
//!
//! Allocates fixed-size f64 buffers until a cumulative byte cap or a chunk
//! cap is reached, measuring the free-memory delta across the allocation
//! run. Buffers are released before the result is returned. An allocation
//! failure is captured as a partial result, never propagated.

use crate::system::ResourceSampler;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Elements per allocation chunk (1 Mi f64 values, 8 MiB)
pub const MEMORY_CHUNK_ELEMS: usize = 1 << 20;

/// Configuration for the memory stress sub-test
#[derive(Debug, Clone)]
pub struct MemoryStressConfig {
    /// f64 elements per chunk
    pub chunk_elems: usize,
    /// Cumulative allocation cap in bytes
    pub max_bytes: u64,
    /// Maximum number of chunks
    pub max_chunks: usize,
}

impl Default for MemoryStressConfig {
    fn default() -> Self {
        Self {
            chunk_elems: MEMORY_CHUNK_ELEMS,
            max_bytes: 1 << 30, // 1 GiB
            max_chunks: 100,
        }
    }
}

/// Outcome of the memory stress sub-test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStressResult {
    /// Bytes successfully allocated
    pub allocated_bytes: u64,
    /// Number of chunks allocated
    pub chunks: usize,
    /// Free memory before the allocation run, bytes
    pub free_before: u64,
    /// Free memory at peak allocation, bytes
    pub free_after: u64,
    /// Observed free-memory drop in bytes (may be negative if the OS
    /// reclaimed memory elsewhere during the run)
    pub free_memory_drop: i64,
    /// Set when an allocation failed; the other fields describe the
    /// partial run up to that point
    pub error: Option<String>,
}

/// Run the memory stress sub-test to completion
pub fn run_memory_stress(config: &MemoryStressConfig) -> MemoryStressResult {
    let mut sampler = ResourceSampler::new();
    let free_before = sampler.free_memory();

    let mut rng = rand::thread_rng();
    let mut buffers: Vec<Vec<f64>> = Vec::new();
    let mut allocated: u64 = 0;
    let mut error = None;

    let chunk_bytes = (config.chunk_elems * std::mem::size_of::<f64>()) as u64;

    while allocated < config.max_bytes && buffers.len() < config.max_chunks {
        let mut chunk: Vec<f64> = Vec::new();
        if let Err(e) = chunk.try_reserve_exact(config.chunk_elems) {
            error = Some(format!(
                "allocation failed after {} chunks ({} bytes): {}",
                buffers.len(),
                allocated,
                e
            ));
            break;
        }
        chunk.resize(config.chunk_elems, rng.gen::<f64>());
        allocated += chunk_bytes;
        buffers.push(chunk);
    }

    let chunks = buffers.len();
    let free_after = sampler.free_memory();
    drop(buffers);

    tracing::info!(allocated, chunks, "memory stress finished");

    MemoryStressResult {
        allocated_bytes: allocated,
        chunks,
        free_before,
        free_after,
        free_memory_drop: free_before as i64 - free_after as i64,
        error,
    }
}
