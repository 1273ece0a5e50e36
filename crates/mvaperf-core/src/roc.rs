//! ROC curve, AUC and figure-of-merit maxima from a pair of response histograms.
//!
//! Bins are scanned from the highest score down. Each non-empty bin adds its
//! normalised signal and background content to the running efficiencies,
//! appends one `(ε_b, ε_s)` point and, once both efficiencies are positive,
//! offers every tracked figure of merit at the bin's lower edge.

use serde::{Deserialize, Serialize};

use crate::histogram::normalise;
use crate::metrics::{FigureOfMeritMaxima, MetricSet, Weights};
use crate::{Error, Result};

/// One point of a ROC curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RocPoint {
    /// Cumulative background efficiency (1 − specificity)
    pub bkg_eff: f64,
    /// Cumulative signal efficiency (sensitivity)
    pub sig_eff: f64,
}

/// Output of [`scan`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocScan {
    /// Visited points, starting at (0, 0).
    pub points: Vec<RocPoint>,
    /// Trapezoidal area under `points`.
    pub auc: f64,
    /// Best cut per tracked figure of merit.
    pub maxima: FigureOfMeritMaxima,
}

impl RocScan {
    /// Curve as `(x, y)` = `(ε_b, ε_s)` pairs.
    pub fn curve(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.bkg_eff, p.sig_eff)).collect()
    }
}

/// Scan signal and background bin counts (index 0 = lowest score).
///
/// `low_edges[i]` is the score cutoff reported when bin `i` maximises a
/// figure of merit. All three slices must have the same length.
pub fn scan(
    sig: &[f64],
    bkg: &[f64],
    low_edges: &[f64],
    weights: &Weights,
    metrics: MetricSet,
) -> Result<RocScan> {
    if sig.len() != bkg.len() || sig.len() != low_edges.len() {
        return Err(Error::Validation(format!(
            "ROC scan needs equal-length inputs, got signal={} background={} edges={}",
            sig.len(),
            bkg.len(),
            low_edges.len()
        )));
    }
    weights.validate()?;

    let sig_norm = normalise(sig);
    let bkg_norm = normalise(bkg);

    let mut sig_eff = 0.0;
    let mut bkg_eff = 0.0;
    let mut auc = 0.0;
    let mut points = Vec::with_capacity(sig.len() + 1);
    let mut maxima = FigureOfMeritMaxima::default();
    points.push(RocPoint { bkg_eff, sig_eff });

    for ibin in (0..sig.len()).rev() {
        if sig[ibin] == 0.0 && bkg[ibin] == 0.0 {
            continue;
        }
        let this_sig = sig_norm[ibin];
        let this_bkg = bkg_norm[ibin];

        auc += (sig_eff + this_sig / 2.0) * this_bkg;
        sig_eff += this_sig;
        bkg_eff += this_bkg;
        points.push(RocPoint { bkg_eff, sig_eff });

        if sig_eff > 0.0 && bkg_eff > 0.0 {
            let cut = low_edges[ibin];
            for &fom in metrics.figures() {
                maxima.offer(fom, fom.evaluate(sig_eff, bkg_eff, weights), cut);
            }
        }
    }

    Ok(RocScan { points, auc, maxima })
}

/// Exact trapezoidal integral of a polyline of ROC points.
pub fn trapezoid_area(points: &[RocPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| (w[1].bkg_eff - w[0].bkg_eff) * (w[0].sig_eff + w[1].sig_eff) / 2.0)
        .sum()
}
