use mvaperf_core::{ClassifierResult, FigureOfMerit, RocPoint};
use serde::{Deserialize, Serialize};

use crate::meta::ArtifactMeta;

/// One figure-of-merit maximum, flattened for JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestCutEntry {
    /// Figure label, e.g. `S/sqrt(B)`
    pub figure: String,
    /// Maximum value
    pub value: f64,
    /// Score cutoff where the maximum occurs
    pub cut: f64,
}

/// Data behind a `<config>_ROC` plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocArtifact {
    /// `mvaperf_roc_v0`
    pub schema_version: String,
    /// Producer stamp
    pub meta: ArtifactMeta,
    /// Configuration name
    pub config_name: String,
    /// Classifier title
    pub classifier_title: String,
    /// Feature-set title
    pub features_title: String,
    /// Training sample label, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_events: Option<String>,
    /// Area under the curve
    pub auc: f64,
    /// Background efficiency (x)
    pub bkg_eff: Vec<f64>,
    /// Signal efficiency (y)
    pub sig_eff: Vec<f64>,
    /// Tracked figure-of-merit maxima
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub best_cuts: Vec<BestCutEntry>,
}

/// Build the ROC artifact of one configuration.
pub fn roc_artifact(curve: &[RocPoint], r: &ClassifierResult) -> RocArtifact {
    let best_cuts = FigureOfMerit::ALL
        .iter()
        .filter_map(|&fom| {
            r.best(fom).map(|b| BestCutEntry {
                figure: fom.label().to_string(),
                value: b.value,
                cut: b.cut,
            })
        })
        .collect();

    RocArtifact {
        schema_version: "mvaperf_roc_v0".to_string(),
        meta: ArtifactMeta::default(),
        config_name: r.config_name.clone(),
        classifier_title: r.classifier_title(),
        features_title: r.features_title.clone(),
        training_events: r.training_events_label().map(str::to_string),
        auc: r.auc,
        bkg_eff: curve.iter().map(|p| p.bkg_eff).collect(),
        sig_eff: curve.iter().map(|p| p.sig_eff).collect(),
        best_cuts,
    }
}
