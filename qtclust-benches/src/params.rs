//! Benchmark parameter types.
//!
//! Groups related benchmark parameters into structs so benchmark IDs render
//! consistently across groups.

use std::fmt;

/// Parameters for one engine benchmark run.
#[derive(Clone, Debug)]
pub struct EngineBenchParams {
    /// Number of instances in the dataset.
    pub instance_count: usize,
    /// Worker threads used by the parallel engine (1 for sequential).
    pub threads: usize,
}

impl fmt::Display for EngineBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},threads={}", self.instance_count, self.threads)
    }
}
