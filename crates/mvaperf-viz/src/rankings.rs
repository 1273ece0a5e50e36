use std::fmt::Write as _;

use mvaperf_core::{ClassifierResult, FigureOfMerit, RankingKey, rank};
use serde::{Deserialize, Serialize};

use crate::meta::ArtifactMeta;

/// One row of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// 1-based position
    pub rank: usize,
    /// Configuration name
    pub config_name: String,
    /// Classifier title
    pub classifier_title: String,
    /// Feature-set tag
    pub features_tag: String,
    /// Training events label, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_events: Option<String>,
    /// Ranked value, `None` if undefined for this result
    pub value: Option<f64>,
    /// Score cutoff, for figure-of-merit rankings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cut: Option<f64>,
}

/// All results ordered by one key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingTable {
    /// Sort key
    pub key: RankingKey,
    /// Heading
    pub title: String,
    /// Rows, best first
    pub entries: Vec<RankingEntry>,
}

/// Every ranking of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingsArtifact {
    /// `mvaperf_rankings_v0`
    pub schema_version: String,
    /// Producer stamp
    pub meta: ArtifactMeta,
    /// One table per key
    pub rankings: Vec<RankingTable>,
}

fn cut_of(key: RankingKey, r: &ClassifierResult) -> Option<f64> {
    let fom = match key {
        RankingKey::Auc | RankingKey::TrainingTime => return None,
        RankingKey::SOverB => FigureOfMerit::SOverB,
        RankingKey::SOverSqrtB => FigureOfMerit::SOverSqrtB,
        RankingKey::SOverSqrtSB => FigureOfMerit::SOverSqrtSB,
    };
    r.best(fom).map(|b| b.cut)
}

/// Rank `results` by every [`RankingKey`].
pub fn rankings_artifact(results: &[ClassifierResult]) -> RankingsArtifact {
    let rankings = RankingKey::ALL
        .iter()
        .map(|&key| RankingTable {
            key,
            title: key.title().to_string(),
            entries: rank(results, key)
                .into_iter()
                .enumerate()
                .map(|(i, r)| RankingEntry {
                    rank: i + 1,
                    config_name: r.config_name.clone(),
                    classifier_title: r.classifier_title(),
                    features_tag: r.features_tag.clone(),
                    training_events: r.training_events_label().map(str::to_string),
                    value: key.value(r),
                    cut: cut_of(key, r),
                })
                .collect(),
        })
        .collect();

    RankingsArtifact {
        schema_version: "mvaperf_rankings_v0".to_string(),
        meta: ArtifactMeta::default(),
        rankings,
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|x| format!("{x}")).unwrap_or_else(|| "-".to_string())
}

impl RankingsArtifact {
    /// Plain-text rendering, one block per ranking.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for table in &self.rankings {
            let _ = writeln!(out, "== {} ranking ==", table.title);
            for e in &table.entries {
                let name = format!("{} [{}]", e.config_name, e.classifier_title);
                let _ = match table.key {
                    RankingKey::Auc => writeln!(
                        out,
                        "Rank = {:<3} : {:<40} AUC = {}",
                        e.rank,
                        name,
                        fmt_opt(e.value)
                    ),
                    RankingKey::TrainingTime => writeln!(
                        out,
                        "Rank = {:<3} : {:<40} Training Time = {}s",
                        e.rank,
                        name,
                        fmt_opt(e.value)
                    ),
                    _ => writeln!(
                        out,
                        "Rank = {:<3} : {:<40} max({}) = {:<20} cut = {}",
                        e.rank,
                        name,
                        table.title,
                        fmt_opt(e.value),
                        fmt_opt(e.cut)
                    ),
                };
            }
            out.push('\n');
        }
        out
    }
}
