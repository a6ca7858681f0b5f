//! Library surface of the qtclust CLI.
//!
//! Splitting the CLI into a library keeps command orchestration and logging
//! initialisation unit-testable without spawning the binary.

pub mod cli;
pub mod logging;
