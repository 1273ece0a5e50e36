//! Grouped bar summary artifact: one scalar (AUC or training time) per
//! (category, series) cell, e.g. AUC per network structure with one bar per
//! training-sample size.

use std::cmp::Ordering;

use mvaperf_core::{ClassifierResult, Error, Result, Selector, Structure};
use serde::{Deserialize, Serialize};

use crate::meta::ArtifactMeta;

/// Quantity on the value axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryMetric {
    /// Area under the ROC curve
    Auc,
    /// Training wall time in seconds
    TrainingTime,
}

impl SummaryMetric {
    /// Axis title.
    pub fn axis_label(self) -> &'static str {
        match self {
            SummaryMetric::Auc => "AUC",
            SummaryMetric::TrainingTime => "Training Time [s]",
        }
    }

    /// Value for `r`, if known.
    pub fn value(self, r: &ClassifierResult) -> Option<f64> {
        match self {
            SummaryMetric::Auc => Some(r.auc),
            SummaryMetric::TrainingTime => r.training_time_s,
        }
    }
}

/// Result attribute used for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryAxis {
    /// `LxN` network structure
    Structure,
    /// Training events label
    TrainingEvents,
}

impl SummaryAxis {
    /// Grouping key of `r` (`2x15`, `338K`).
    pub fn key(self, r: &ClassifierResult) -> Option<String> {
        match self {
            SummaryAxis::Structure => r.structure.map(|s| s.key()),
            SummaryAxis::TrainingEvents => r.training_events_label().map(str::to_string),
        }
    }

    /// Text shown for a key.
    pub fn display(self, key: &str) -> String {
        match self {
            SummaryAxis::Structure => match Structure::parse(key) {
                Ok(s) => s.to_string(),
                Err(_) => key.to_string(),
            },
            SummaryAxis::TrainingEvents => key.to_string(),
        }
    }

    /// Axis or legend title.
    pub fn title(self) -> &'static str {
        match self {
            SummaryAxis::Structure => "Layers \u{00D7} Nodes",
            SummaryAxis::TrainingEvents => "Training Events",
        }
    }

    /// Distinct keys present in `results`, smallest first.
    pub fn observed_keys(self, results: &[&ClassifierResult]) -> Vec<String> {
        match self {
            SummaryAxis::Structure => {
                let mut v: Vec<Structure> = results.iter().filter_map(|r| r.structure).collect();
                v.sort();
                v.dedup();
                v.iter().map(Structure::key).collect()
            }
            SummaryAxis::TrainingEvents => {
                let mut v: Vec<(u64, String)> = results
                    .iter()
                    .filter_map(|r| r.training_events.as_ref().map(|t| (t.count, t.label.clone())))
                    .collect();
                v.sort();
                v.dedup();
                v.into_iter().map(|(_, l)| l).collect()
            }
        }
    }
}

/// One bar summary as declared in a report config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BarSummarySpec {
    /// Output name; the plot is written as `Summary_<name>`
    pub name: String,
    /// Value axis quantity
    pub metric: SummaryMetric,
    /// Only results with this feature-set title
    pub features_title: String,
    /// Groups along the category axis
    pub categories: SummaryAxis,
    /// Bars within a group
    pub series: SummaryAxis,
    /// Explicit category keys; default is every observed key
    #[serde(default)]
    pub category_order: Option<Vec<String>>,
    /// Explicit series keys; default is every observed key
    #[serde(default)]
    pub series_order: Option<Vec<String>>,
    /// Fixed value-axis range
    #[serde(default)]
    pub y_range: Option<[f64; 2]>,
    /// Log value axis; defaults to on for training time
    #[serde(default)]
    pub log_y: Option<bool>,
    /// Further filtering
    #[serde(default)]
    pub select: Selector,
}

/// Bars of one series, aligned with [`BarSummaryArtifact::categories`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    /// Legend text
    pub label: String,
    /// Value per category; `None` draws no bar
    pub values: Vec<Option<f64>>,
}

/// Data behind a `Summary_<name>` plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSummaryArtifact {
    /// `mvaperf_bar_summary_v0`
    pub schema_version: String,
    /// Producer stamp
    pub meta: ArtifactMeta,
    /// Summary name
    pub name: String,
    /// Text box title (feature-set title)
    pub title: String,
    /// Category axis title
    pub x_label: String,
    /// Value axis title
    pub y_label: String,
    /// Legend header
    pub legend_header: String,
    /// Category labels
    pub categories: Vec<String>,
    /// One entry per series
    pub series: Vec<BarSeries>,
    /// Fixed value range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_range: Option<[f64; 2]>,
    /// Log value axis
    #[serde(default)]
    pub log_y: bool,
}

/// Fill a bar summary from `results`. A later result for the same cell
/// replaces an earlier one.
pub fn bar_summary_artifact(
    results: &[ClassifierResult],
    spec: &BarSummarySpec,
) -> Result<BarSummaryArtifact> {
    if spec.categories == spec.series {
        return Err(Error::Validation(format!(
            "summary `{}`: categories and series must differ",
            spec.name
        )));
    }
    if let Some([lo, hi]) = spec.y_range
        && lo.partial_cmp(&hi) != Some(Ordering::Less)
    {
        return Err(Error::Validation(format!(
            "summary `{}`: y_range must satisfy min < max, got [{lo}, {hi}]",
            spec.name
        )));
    }

    let picked: Vec<&ClassifierResult> = results
        .iter()
        .filter(|r| r.features_title == spec.features_title && spec.select.matches(r))
        .collect();

    let cat_keys =
        spec.category_order.clone().unwrap_or_else(|| spec.categories.observed_keys(&picked));
    let ser_keys = spec.series_order.clone().unwrap_or_else(|| spec.series.observed_keys(&picked));

    let mut grid = vec![vec![None; cat_keys.len()]; ser_keys.len()];
    for r in &picked {
        let (Some(ck), Some(sk)) = (spec.categories.key(r), spec.series.key(r)) else {
            continue;
        };
        let (Some(ci), Some(si)) =
            (cat_keys.iter().position(|k| *k == ck), ser_keys.iter().position(|k| *k == sk))
        else {
            continue;
        };
        if let Some(v) = spec.metric.value(r) {
            grid[si][ci] = Some(v);
        }
    }

    let series = ser_keys
        .iter()
        .zip(grid)
        .map(|(k, values)| BarSeries { label: spec.series.display(k), values })
        .collect();

    Ok(BarSummaryArtifact {
        schema_version: "mvaperf_bar_summary_v0".to_string(),
        meta: ArtifactMeta::default(),
        name: spec.name.clone(),
        title: spec.features_title.clone(),
        x_label: spec.categories.title().to_string(),
        y_label: spec.metric.axis_label().to_string(),
        legend_header: spec.series.title().to_string(),
        categories: cat_keys.iter().map(|k| spec.categories.display(k)).collect(),
        series,
        y_range: spec.y_range,
        log_y: spec.log_y.unwrap_or(spec.metric == SummaryMetric::TrainingTime),
    })
}
