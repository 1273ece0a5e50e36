//! ROC overlay artifact: several configurations' curves on one canvas, picked
//! by a [`Selector`] and ordered for the legend.

use std::cmp::Ordering;

use mvaperf_core::{ClassifierResult, EvaluatedConfig, ResultSet, Selector};
use serde::{Deserialize, Serialize};

use crate::meta::ArtifactMeta;

/// Legend order of an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlaySort {
    /// Highest AUC first
    #[default]
    Auc,
    /// Smallest training sample first
    TrainingEvents,
    /// Fewest layers first, then fewest nodes
    Complexity,
}

/// What each legend entry names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayLabel {
    /// Classifier title
    Classifier,
    /// Feature-set title
    Features,
    /// `<classifier title>, <feature-set title>`
    #[default]
    ClassifierFeatures,
    /// Training events label
    TrainingEvents,
    /// `L×N`
    Structure,
    /// Configuration name
    Config,
}

impl OverlayLabel {
    fn text(self, r: &ClassifierResult) -> String {
        match self {
            OverlayLabel::Classifier => r.classifier_title(),
            OverlayLabel::Features => r.features_title.clone(),
            OverlayLabel::ClassifierFeatures => {
                format!("{}, {}", r.classifier_title(), r.features_title)
            }
            OverlayLabel::TrainingEvents => {
                r.training_events_label().unwrap_or(&r.config_name).to_string()
            }
            OverlayLabel::Structure => {
                r.structure.map(|s| s.to_string()).unwrap_or_else(|| r.config_name.clone())
            }
            OverlayLabel::Config => r.config_name.clone(),
        }
    }
}

/// One overlay as declared in a report config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OverlaySpec {
    /// Output name; the plot is written as `OverlayROC_<name>`
    pub name: String,
    /// Legend header
    #[serde(default)]
    pub header: Option<String>,
    /// Legend order
    #[serde(default)]
    pub sort: OverlaySort,
    /// Legend entry text
    #[serde(default)]
    pub label: OverlayLabel,
    /// Which configurations to include
    #[serde(default)]
    pub select: Selector,
}

/// One curve of an overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocOverlaySeries {
    /// Legend text, `<label> (AUC=0.000)`
    pub label: String,
    /// Configuration name
    pub config_name: String,
    /// Area under the curve
    pub auc: f64,
    /// Background efficiency (x)
    pub bkg_eff: Vec<f64>,
    /// Signal efficiency (y)
    pub sig_eff: Vec<f64>,
}

/// Data behind an `OverlayROC_<name>` plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocOverlayArtifact {
    /// `mvaperf_roc_overlay_v0`
    pub schema_version: String,
    /// Producer stamp
    pub meta: ArtifactMeta,
    /// Overlay name
    pub name: String,
    /// Legend header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// Curves in legend order
    pub series: Vec<RocOverlaySeries>,
}

fn compare(sort: OverlaySort, a: &ClassifierResult, b: &ClassifierResult) -> Ordering {
    fn none_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
        match (a, b) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
    match sort {
        OverlaySort::Auc => b.auc.total_cmp(&a.auc),
        OverlaySort::TrainingEvents => none_last(
            a.training_events.as_ref().map(|t| t.count),
            b.training_events.as_ref().map(|t| t.count),
        ),
        OverlaySort::Complexity => none_last(a.structure, b.structure),
    }
}

/// Build an overlay from every matching configuration in `set`.
///
/// An empty `series` means nothing matched; callers skip the plot.
pub fn roc_overlay_artifact(set: &ResultSet, spec: &OverlaySpec) -> RocOverlayArtifact {
    let mut picked: Vec<&EvaluatedConfig> = set.select(&spec.select).collect();
    picked.sort_by(|a, b| compare(spec.sort, &a.result, &b.result));

    let series = picked
        .into_iter()
        .map(|e| RocOverlaySeries {
            label: format!("{} (AUC={})", spec.label.text(&e.result), e.result.auc_label()),
            config_name: e.result.config_name.clone(),
            auc: e.result.auc,
            bkg_eff: e.curve.iter().map(|p| p.bkg_eff).collect(),
            sig_eff: e.curve.iter().map(|p| p.sig_eff).collect(),
        })
        .collect();

    RocOverlayArtifact {
        schema_version: "mvaperf_roc_overlay_v0".to_string(),
        meta: ArtifactMeta::default(),
        name: spec.name.clone(),
        header: spec.header.clone(),
        series,
    }
}
