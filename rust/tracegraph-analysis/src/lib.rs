//! Tracegraph Analysis
//!
//! Critical-path computation over a [`tracegraph_core::TraceGraph`]: the
//! bounded resolution algorithm, the registry of available algorithms,
//! configuration, and summaries of computed paths.
#![warn(clippy::all)]

pub mod algorithm;
pub mod bounded;
pub mod config;
pub mod error;
pub mod registry;
pub mod summary;
pub mod worker_path;

pub use algorithm::{AlgorithmKind, CriticalPathAlgorithm};
pub use bounded::BoundedCriticalPath;
pub use config::{ConfigError, CriticalPathConfig, TraceGraphConfig};
pub use error::CriticalPathError;
pub use registry::{AlgorithmDescriptor, AlgorithmRegistry};
pub use summary::{critical_path_edges, PathSummary};
pub use worker_path::compute_worker_critical_path;
