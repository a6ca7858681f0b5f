//! Qtclust core library: quality-threshold (QT) clustering engines.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod caching;
mod calculator;
mod clusterer;
mod engine;
mod error;
mod mcl;
mod progress;
mod store;

#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::{ExecutionStrategy, OverlapPolicy, QtClustererBuilder},
    caching::CachingCalculator,
    calculator::{DistanceCalculator, max_linkage},
    clusterer::{Clusterer, QtClusterer},
    error::{DistanceError, DistanceErrorCode, QtError, QtErrorCode, Result},
    mcl::{MCL_COMMAND_ENV, MclClusterer},
    progress::{NoopProgress, ProgressEvent, ProgressObserver},
};
