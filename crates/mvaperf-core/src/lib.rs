//! # mvaperf-core
//!
//! Core types for mvaperf: binned classifier response histograms, the ROC /
//! figure-of-merit accumulator, and the per-configuration result record that
//! reporting consumes.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod histogram;
pub mod metrics;
pub mod ranking;
pub mod result;
pub mod result_set;
pub mod roc;
pub mod select;

pub use error::{Error, Result};
pub use histogram::{BOUNDARY_EPSILON, Binning, EventClass, ResponsePair, ScoreHistogram};
pub use metrics::{BestCut, FigureOfMerit, FigureOfMeritMaxima, MetricSet, Weights};
pub use ranking::{RankingKey, rank};
pub use result::{ClassifierResult, Structure, TrainingEvents};
pub use result_set::{EvaluatedConfig, ResultSet};
pub use roc::{RocPoint, RocScan, scan, trapezoid_area};
pub use select::Selector;

/// Workspace version, reported by `mvaperf version` and stamped into artifacts.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
