//! # mvaperf-viz
//!
//! Visualization data artifacts for mvaperf.
//!
//! Each plot the report produces has a serializable artifact here, built
//! from core results and kept flat (parallel arrays rather than nested
//! objects) so it can be rendered later or by other tools.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Grouped vertical bar summaries.
pub mod bars;

/// Shared artifact metadata.
pub mod meta;

/// Multi-curve ROC overlays.
pub mod overlay;

/// Ranking tables.
pub mod rankings;

/// Signal/background response distributions.
pub mod response;

/// Single ROC curves.
pub mod roc;

/// Two-panel horizontal bar summary.
pub mod sideways;

pub use bars::{
    BarSeries, BarSummaryArtifact, BarSummarySpec, SummaryAxis, SummaryMetric, bar_summary_artifact,
};
pub use meta::ArtifactMeta;
pub use overlay::{
    OverlayLabel, OverlaySort, OverlaySpec, RocOverlayArtifact, RocOverlaySeries,
    roc_overlay_artifact,
};
pub use rankings::{RankingEntry, RankingTable, RankingsArtifact, rankings_artifact};
pub use response::{ResponseArtifact, response_artifact};
pub use roc::{BestCutEntry, RocArtifact, roc_artifact};
pub use sideways::{
    SidewaysSection, SidewaysSeries, SidewaysSpec, SidewaysSummaryArtifact,
    sideways_summary_artifact,
};
