//! Response distribution artifact: signal and background classifier output,
//! each normalised to unit area, with per-bin statistical errors.

use mvaperf_core::{ClassifierResult, ResponsePair};
use serde::{Deserialize, Serialize};

use crate::meta::ArtifactMeta;

/// Data behind a `<config>_Output` plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseArtifact {
    /// `mvaperf_response_v0`
    pub schema_version: String,
    /// Producer stamp
    pub meta: ArtifactMeta,
    /// Configuration name, used for the output file name
    pub config_name: String,
    /// Classifier title, e.g. `NeuroBGD 2×15`
    pub classifier_title: String,
    /// Feature-set title
    pub features_title: String,
    /// Training sample label, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_events: Option<String>,
    /// Area under the ROC curve of this configuration
    pub auc: f64,
    /// x-axis label
    pub x_label: String,
    /// y-axis label
    pub y_label: String,
    /// Bin edges (length = n_bins + 1)
    pub bin_edges: Vec<f64>,
    /// Signal, unit area
    pub signal_y: Vec<f64>,
    /// Signal statistical error
    pub signal_yerr: Vec<f64>,
    /// Background, unit area
    pub background_y: Vec<f64>,
    /// Background statistical error
    pub background_yerr: Vec<f64>,
}

/// Build the response artifact of one configuration.
pub fn response_artifact(pair: &ResponsePair, r: &ClassifierResult) -> ResponseArtifact {
    ResponseArtifact {
        schema_version: "mvaperf_response_v0".to_string(),
        meta: ArtifactMeta::default(),
        config_name: r.config_name.clone(),
        classifier_title: r.classifier_title(),
        features_title: r.features_title.clone(),
        training_events: r.training_events_label().map(str::to_string),
        auc: r.auc,
        x_label: format!("{} Output", r.classifier),
        y_label: "Normalized Number of Events".to_string(),
        bin_edges: pair.binning().edges(),
        signal_y: pair.signal.normalized(),
        signal_yerr: pair.signal.normalized_errors(),
        background_y: pair.background.normalized(),
        background_yerr: pair.background.normalized_errors(),
    }
}
