//! Figures of merit evaluated at a score cutoff.
//!
//! Efficiencies are converted to yields with per-class weights and the
//! counting-unit factor of 100: `S = 100·ε_s·w_s`, `B = 100·ε_b·w_b`.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// ttH cross-section [fb] times preselection efficiency.
pub const DEFAULT_SIGNAL_WEIGHT: f64 = 463.4 * 0.10350984;

/// ttbar cross-section [fb] times loose preselection efficiency.
pub const DEFAULT_BACKGROUND_WEIGHT: f64 = 313300.0 * 0.01304861;

/// Per-class scale weights converting efficiencies to a physical yield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    /// Signal weight
    pub signal: f64,
    /// Background weight
    pub background: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self { signal: DEFAULT_SIGNAL_WEIGHT, background: DEFAULT_BACKGROUND_WEIGHT }
    }
}

impl Weights {
    /// Create validated weights.
    pub fn new(signal: f64, background: f64) -> Result<Self> {
        let w = Self { signal, background };
        w.validate()?;
        Ok(w)
    }

    /// Both weights must be finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        for (name, v) in [("signal", self.signal), ("background", self.background)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(Error::Validation(format!("{name} weight must be > 0, got {v}")));
            }
        }
        Ok(())
    }
}

/// Which figures of merit a scan tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricSet {
    /// S/B, S/√B, S/√(S+B)
    #[default]
    Yields,
    /// Yields plus precision, recall and F1
    Full,
}

impl MetricSet {
    /// Figures of merit in this set, in reporting order.
    pub fn figures(self) -> &'static [FigureOfMerit] {
        match self {
            MetricSet::Yields => &FigureOfMerit::YIELDS,
            MetricSet::Full => &FigureOfMerit::ALL,
        }
    }
}

/// A scalar used to pick an operating threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FigureOfMerit {
    /// S/B
    SOverB,
    /// S/√B
    SOverSqrtB,
    /// S/√(S+B)
    SOverSqrtSB,
    /// ε_s / (ε_s + ε_b)
    Precision,
    /// ε_s
    Recall,
    /// Harmonic mean of precision and recall
    F1,
}

impl FigureOfMerit {
    /// Yield-based figures.
    pub const YIELDS: [FigureOfMerit; 3] =
        [FigureOfMerit::SOverB, FigureOfMerit::SOverSqrtB, FigureOfMerit::SOverSqrtSB];

    /// Every figure.
    pub const ALL: [FigureOfMerit; 6] = [
        FigureOfMerit::SOverB,
        FigureOfMerit::SOverSqrtB,
        FigureOfMerit::SOverSqrtSB,
        FigureOfMerit::Precision,
        FigureOfMerit::Recall,
        FigureOfMerit::F1,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            FigureOfMerit::SOverB => "S/B",
            FigureOfMerit::SOverSqrtB => "S/sqrt(B)",
            FigureOfMerit::SOverSqrtSB => "S/sqrt(S+B)",
            FigureOfMerit::Precision => "precision",
            FigureOfMerit::Recall => "recall",
            FigureOfMerit::F1 => "F1",
        }
    }

    /// Evaluate at cumulative efficiencies `(sig_eff, bkg_eff)`.
    ///
    /// Callers gate on both efficiencies being positive.
    pub fn evaluate(self, sig_eff: f64, bkg_eff: f64, weights: &Weights) -> f64 {
        let s = 100.0 * sig_eff * weights.signal;
        let b = 100.0 * bkg_eff * weights.background;
        match self {
            FigureOfMerit::SOverB => s / b,
            FigureOfMerit::SOverSqrtB => s / b.sqrt(),
            FigureOfMerit::SOverSqrtSB => s / (b + s).sqrt(),
            FigureOfMerit::Precision => sig_eff / (sig_eff + bkg_eff),
            FigureOfMerit::Recall => sig_eff,
            FigureOfMerit::F1 => {
                let precision = sig_eff / (sig_eff + bkg_eff);
                let recall = sig_eff;
                (2.0 * precision * recall) / (precision + recall)
            }
        }
    }
}

/// Maximum of a figure of merit and the cutoff (bin lower edge) where it occurs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestCut {
    /// Maximum value
    pub value: f64,
    /// Score cutoff
    pub cut: f64,
}

/// Running maxima, one slot per figure of merit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FigureOfMeritMaxima {
    /// max S/B
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s_over_b: Option<BestCut>,
    /// max S/√B
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s_over_sqrt_b: Option<BestCut>,
    /// max S/√(S+B)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s_over_sqrt_sb: Option<BestCut>,
    /// max precision
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<BestCut>,
    /// max recall
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recall: Option<BestCut>,
    /// max F1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub f1: Option<BestCut>,
}

impl FigureOfMeritMaxima {
    /// Current best for `fom`.
    pub fn get(&self, fom: FigureOfMerit) -> Option<&BestCut> {
        match fom {
            FigureOfMerit::SOverB => self.s_over_b.as_ref(),
            FigureOfMerit::SOverSqrtB => self.s_over_sqrt_b.as_ref(),
            FigureOfMerit::SOverSqrtSB => self.s_over_sqrt_sb.as_ref(),
            FigureOfMerit::Precision => self.precision.as_ref(),
            FigureOfMerit::Recall => self.recall.as_ref(),
            FigureOfMerit::F1 => self.f1.as_ref(),
        }
    }

    fn slot_mut(&mut self, fom: FigureOfMerit) -> &mut Option<BestCut> {
        match fom {
            FigureOfMerit::SOverB => &mut self.s_over_b,
            FigureOfMerit::SOverSqrtB => &mut self.s_over_sqrt_b,
            FigureOfMerit::SOverSqrtSB => &mut self.s_over_sqrt_sb,
            FigureOfMerit::Precision => &mut self.precision,
            FigureOfMerit::Recall => &mut self.recall,
            FigureOfMerit::F1 => &mut self.f1,
        }
    }

    /// Offer a candidate. Ties replace the stored cut (`>=`): the scan runs
    /// from high to low score, so a plateau reports its loosest cutoff.
    pub fn offer(&mut self, fom: FigureOfMerit, value: f64, cut: f64) {
        let slot = self.slot_mut(fom);
        match slot {
            Some(best) if value < best.value => {}
            _ => *slot = Some(BestCut { value, cut }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_weights_scale_to_one_inverse_fb() {
        let w = Weights::default();
        assert_relative_eq!(w.signal, 47.966459856, epsilon = 1e-6);
        assert_relative_eq!(w.background, 4088.129513, epsilon = 1e-3);
    }

    #[test]
    fn weights_must_be_positive() {
        assert!(Weights::new(1.0, 0.0).is_err());
        assert!(Weights::new(-1.0, 1.0).is_err());
        assert!(Weights::new(f64::NAN, 1.0).is_err());
        assert!(Weights::new(48.0, 4088.0).is_ok());
    }

    #[test]
    fn s_over_b_matches_hand_computation() {
        let w = Weights::new(48.0, 4088.0).unwrap();
        let v = FigureOfMerit::SOverB.evaluate(0.5, 0.5, &w);
        assert_eq!(v, (100.0 * 0.5 * 48.0) / (100.0 * 0.5 * 4088.0));
    }

    #[test]
    fn significance_figures() {
        let w = Weights::new(48.0, 4088.0).unwrap();
        let s = 100.0 * 0.5 * 48.0;
        let b = 100.0 * 0.25 * 4088.0;
        assert_eq!(FigureOfMerit::SOverSqrtB.evaluate(0.5, 0.25, &w), s / f64::sqrt(b));
        assert_eq!(FigureOfMerit::SOverSqrtSB.evaluate(0.5, 0.25, &w), s / f64::sqrt(b + s));
    }

    #[test]
    fn classification_figures() {
        let w = Weights::default();
        assert_relative_eq!(FigureOfMerit::Precision.evaluate(0.6, 0.2, &w), 0.75);
        assert_relative_eq!(FigureOfMerit::Recall.evaluate(0.6, 0.2, &w), 0.6);
        assert_relative_eq!(
            FigureOfMerit::F1.evaluate(0.6, 0.2, &w),
            2.0 * 0.75 * 0.6 / (0.75 + 0.6)
        );
    }

    #[test]
    fn offer_ties_go_to_latest() {
        let mut m = FigureOfMeritMaxima::default();
        m.offer(FigureOfMerit::SOverB, 2.0, 0.9);
        m.offer(FigureOfMerit::SOverB, 1.0, 0.8);
        assert_eq!(m.get(FigureOfMerit::SOverB), Some(&BestCut { value: 2.0, cut: 0.9 }));
        m.offer(FigureOfMerit::SOverB, 2.0, 0.7);
        assert_eq!(m.get(FigureOfMerit::SOverB), Some(&BestCut { value: 2.0, cut: 0.7 }));
        assert!(m.get(FigureOfMerit::F1).is_none());
    }

    #[test]
    fn metric_sets() {
        assert_eq!(MetricSet::Yields.figures().len(), 3);
        assert_eq!(MetricSet::Full.figures().len(), 6);
        assert_eq!(MetricSet::default(), MetricSet::Yields);
    }
}
