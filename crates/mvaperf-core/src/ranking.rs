//! Ordering classifier results by a scalar key.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::metrics::FigureOfMerit;
use crate::result::ClassifierResult;

/// Quantity a ranking sorts by (always descending).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingKey {
    /// Area under the ROC curve
    Auc,
    /// Training wall time
    TrainingTime,
    /// max S/B
    SOverB,
    /// max S/√B
    SOverSqrtB,
    /// max S/√(S+B)
    SOverSqrtSB,
}

impl RankingKey {
    /// All rankings in reporting order.
    pub const ALL: [RankingKey; 5] = [
        RankingKey::Auc,
        RankingKey::TrainingTime,
        RankingKey::SOverB,
        RankingKey::SOverSqrtB,
        RankingKey::SOverSqrtSB,
    ];

    /// Heading used in logs and text reports.
    pub fn title(self) -> &'static str {
        match self {
            RankingKey::Auc => "AUC",
            RankingKey::TrainingTime => "Training Time",
            RankingKey::SOverB => "S/B",
            RankingKey::SOverSqrtB => "S/sqrt(B)",
            RankingKey::SOverSqrtSB => "S/sqrt(S+B)",
        }
    }

    /// Value of this key for `r`, if defined.
    pub fn value(self, r: &ClassifierResult) -> Option<f64> {
        let fom = match self {
            RankingKey::Auc => return Some(r.auc),
            RankingKey::TrainingTime => return r.training_time_s,
            RankingKey::SOverB => FigureOfMerit::SOverB,
            RankingKey::SOverSqrtB => FigureOfMerit::SOverSqrtB,
            RankingKey::SOverSqrtSB => FigureOfMerit::SOverSqrtSB,
        };
        r.best(fom).map(|b| b.value)
    }
}

/// Results sorted by `key`, largest first. Results without a value go last;
/// equal values keep their input order.
pub fn rank(results: &[ClassifierResult], key: RankingKey) -> Vec<&ClassifierResult> {
    let mut out: Vec<&ClassifierResult> = results.iter().collect();
    out.sort_by(|a, b| match (key.value(a), key.value(b)) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::BestCut;

    fn result(name: &str, auc: f64, time: Option<f64>, sb: Option<f64>) -> ClassifierResult {
        let mut r = ClassifierResult::new("src", name, "NeuroBGD", "AF", "All Features");
        r.auc = auc;
        r.training_time_s = time;
        r.maxima.s_over_b = sb.map(|value| BestCut { value, cut: 0.5 });
        r
    }

    fn names(v: &[&ClassifierResult]) -> Vec<String> {
        v.iter().map(|r| r.config_name.clone()).collect()
    }

    #[test]
    fn auc_descending() {
        let rs = vec![
            result("a", 0.7, None, None),
            result("b", 0.9, None, None),
            result("c", 0.8, None, None),
        ];
        assert_eq!(names(&rank(&rs, RankingKey::Auc)), vec!["b", "c", "a"]);
    }

    #[test]
    fn missing_values_sort_last() {
        let rs = vec![
            result("a", 0.7, None, Some(0.02)),
            result("b", 0.9, Some(10.0), None),
            result("c", 0.8, Some(500.0), Some(0.05)),
        ];
        assert_eq!(names(&rank(&rs, RankingKey::TrainingTime)), vec!["c", "b", "a"]);
        assert_eq!(names(&rank(&rs, RankingKey::SOverB)), vec!["c", "a", "b"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let rs = vec![result("x", 0.8, None, None), result("y", 0.8, None, None)];
        assert_eq!(names(&rank(&rs, RankingKey::Auc)), vec!["x", "y"]);
    }

    #[test]
    fn figure_rankings_need_a_tracked_maximum() {
        let r = result("a", 0.7, None, None);
        assert_eq!(RankingKey::SOverSqrtSB.value(&r), None);
        assert_eq!(RankingKey::Auc.value(&r), Some(0.7));
    }
}
