use mvaperf_core::{ClassifierResult, Error, Result, Selector};
use serde::{Deserialize, Serialize};

use crate::bars::SummaryAxis;
use crate::meta::ArtifactMeta;

fn default_name() -> String {
    "SidewaysSummary".to_string()
}

fn default_auc_range() -> [f64; 2] {
    [0.5, 0.82]
}

fn default_time_range() -> [f64; 2] {
    [0.1, 1.0e6]
}

/// The two-panel horizontal summary as declared in a report config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidewaysSpec {
    /// Output name
    #[serde(default = "default_name")]
    pub name: String,
    /// One section per feature-set title, bottom to top
    pub features_titles: Vec<String>,
    /// Training events keys per section; default is every observed key
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    /// Structure keys (`2x15`); default is every observed key
    #[serde(default)]
    pub series: Option<Vec<String>>,
    /// AUC panel range
    #[serde(default = "default_auc_range")]
    pub auc_range: [f64; 2],
    /// Training time panel range (log scale)
    #[serde(default = "default_time_range")]
    pub time_range: [f64; 2],
    /// Further filtering
    #[serde(default)]
    pub select: Selector,
}

/// A block of rows sharing a feature-set title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidewaysSection {
    /// Feature-set title
    pub title: String,
    /// Row labels within the section
    pub categories: Vec<String>,
}

/// Bars of one structure across all rows, section-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidewaysSeries {
    /// Legend text
    pub label: String,
    /// AUC per row
    pub auc: Vec<Option<f64>>,
    /// Training time per row
    pub training_time: Vec<Option<f64>>,
}

/// Data behind the `SidewaysSummary` plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidewaysSummaryArtifact {
    /// `mvaperf_sideways_summary_v0`
    pub schema_version: String,
    /// Producer stamp
    pub meta: ArtifactMeta,
    /// Summary name
    pub name: String,
    /// Row axis title
    pub category_label: String,
    /// Legend header
    pub legend_header: String,
    /// Sections, bottom to top
    pub sections: Vec<SidewaysSection>,
    /// One entry per structure
    pub series: Vec<SidewaysSeries>,
    /// AUC panel range
    pub auc_range: [f64; 2],
    /// Training time panel range
    pub time_range: [f64; 2],
}

impl SidewaysSummaryArtifact {
    /// Total rows across sections.
    pub fn n_rows(&self) -> usize {
        self.sections.iter().map(|s| s.categories.len()).sum()
    }
}

/// Build the sideways summary. Rows are `section * n_categories + category`.
pub fn sideways_summary_artifact(
    results: &[ClassifierResult],
    spec: &SidewaysSpec,
) -> Result<SidewaysSummaryArtifact> {
    if spec.features_titles.is_empty() {
        return Err(Error::Validation("sideways summary needs at least one features title".into()));
    }
    let [a0, a1] = spec.auc_range;
    let [t0, t1] = spec.time_range;
    if a0.partial_cmp(&a1) != Some(std::cmp::Ordering::Less) {
        return Err(Error::Validation(format!(
            "auc_range must satisfy min < max, got [{a0}, {a1}]"
        )));
    }
    if !(t0 > 0.0 && t0 < t1) {
        return Err(Error::Validation(format!(
            "time_range must satisfy 0 < min < max, got [{t0}, {t1}]"
        )));
    }

    let picked: Vec<&ClassifierResult> = results
        .iter()
        .filter(|r| spec.features_titles.contains(&r.features_title) && spec.select.matches(r))
        .collect();

    let cat_keys = spec
        .categories
        .clone()
        .unwrap_or_else(|| SummaryAxis::TrainingEvents.observed_keys(&picked));
    let ser_keys =
        spec.series.clone().unwrap_or_else(|| SummaryAxis::Structure.observed_keys(&picked));

    let n_rows = spec.features_titles.len() * cat_keys.len();
    let mut auc = vec![vec![None; n_rows]; ser_keys.len()];
    let mut time = vec![vec![None; n_rows]; ser_keys.len()];

    for r in &picked {
        let Some(section) = spec.features_titles.iter().position(|t| *t == r.features_title) else {
            continue;
        };
        let (Some(ck), Some(sk)) =
            (SummaryAxis::TrainingEvents.key(r), SummaryAxis::Structure.key(r))
        else {
            continue;
        };
        let (Some(ci), Some(si)) =
            (cat_keys.iter().position(|k| *k == ck), ser_keys.iter().position(|k| *k == sk))
        else {
            continue;
        };
        let row = section * cat_keys.len() + ci;
        auc[si][row] = Some(r.auc);
        time[si][row] = r.training_time_s;
    }

    let series = ser_keys
        .iter()
        .zip(auc.into_iter().zip(time))
        .map(|(k, (auc, training_time))| SidewaysSeries {
            label: SummaryAxis::Structure.display(k),
            auc,
            training_time,
        })
        .collect();

    Ok(SidewaysSummaryArtifact {
        schema_version: "mvaperf_sideways_summary_v0".to_string(),
        meta: ArtifactMeta::default(),
        name: spec.name.clone(),
        category_label: SummaryAxis::TrainingEvents.title().to_string(),
        legend_header: SummaryAxis::Structure.title().to_string(),
        sections: spec
            .features_titles
            .iter()
            .map(|t| SidewaysSection { title: t.clone(), categories: cat_keys.clone() })
            .collect(),
        series,
        auc_range: spec.auc_range,
        time_range: spec.time_range,
    })
}
