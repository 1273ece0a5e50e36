//! Fixed-width response histograms.
//!
//! Classifier scores are binned into `nbins` equal-width intervals over
//! `[xmin, xmax]`. Scores on or outside the range are pulled inside by
//! [`BOUNDARY_EPSILON`] so that every event lands in a real bin; there is no
//! under/overflow.

use serde::{Deserialize, Serialize};

use crate::metrics::{MetricSet, Weights};
use crate::roc::{RocScan, scan};
use crate::{Error, Result};

/// Distance by which boundary scores are nudged into the range.
pub const BOUNDARY_EPSILON: f64 = 0.00001;

/// Equal-width partition of a bounded score range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Binning {
    nbins: usize,
    xmin: f64,
    xmax: f64,
}

impl Binning {
    /// Create a binning, rejecting empty or inverted ranges.
    pub fn new(nbins: usize, xmin: f64, xmax: f64) -> Result<Self> {
        if nbins == 0 {
            return Err(Error::Validation("binning needs at least one bin".into()));
        }
        if !xmin.is_finite() || !xmax.is_finite() {
            return Err(Error::Validation(format!(
                "binning range must be finite, got [{xmin}, {xmax}]"
            )));
        }
        if xmin >= xmax {
            return Err(Error::Validation(format!(
                "binning range must satisfy xmin < xmax, got [{xmin}, {xmax}]"
            )));
        }
        Ok(Self { nbins, xmin, xmax })
    }

    /// Number of bins.
    pub fn nbins(&self) -> usize {
        self.nbins
    }

    /// Lower end of the range.
    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    /// Upper end of the range.
    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    /// Bin width.
    pub fn width(&self) -> f64 {
        (self.xmax - self.xmin) / self.nbins as f64
    }

    /// Lower edge of bin `i`.
    pub fn low_edge(&self, i: usize) -> f64 {
        self.xmin + i as f64 * self.width()
    }

    /// Lower edges of all bins (length `nbins`).
    pub fn low_edges(&self) -> Vec<f64> {
        (0..self.nbins).map(|i| self.low_edge(i)).collect()
    }

    /// All bin edges (length `nbins + 1`).
    pub fn edges(&self) -> Vec<f64> {
        let mut e = self.low_edges();
        e.push(self.xmax);
        e
    }

    /// Pull a score at or beyond either boundary inside the range.
    pub fn clip(&self, x: f64) -> f64 {
        if x <= self.xmin {
            self.xmin + BOUNDARY_EPSILON
        } else if x >= self.xmax {
            self.xmax - BOUNDARY_EPSILON
        } else {
            x
        }
    }

    /// Bin index of an already clipped score.
    pub fn index_of(&self, x: f64) -> usize {
        let raw = ((x - self.xmin) / self.width()).floor();
        if raw <= 0.0 { 0 } else { (raw as usize).min(self.nbins - 1) }
    }
}

/// Which class an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventClass {
    /// ttH
    Signal,
    /// ttbar
    Background,
}

/// Per-bin event counts of one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreHistogram {
    binning: Binning,
    counts: Vec<f64>,
}

impl ScoreHistogram {
    /// Empty histogram over `binning`.
    pub fn new(binning: Binning) -> Self {
        Self { binning, counts: vec![0.0; binning.nbins()] }
    }

    /// Histogram with explicit contents.
    pub fn from_counts(binning: Binning, counts: Vec<f64>) -> Result<Self> {
        if counts.len() != binning.nbins() {
            return Err(Error::Validation(format!(
                "expected {} bin counts, got {}",
                binning.nbins(),
                counts.len()
            )));
        }
        if let Some(bad) = counts.iter().find(|c| !c.is_finite() || **c < 0.0) {
            return Err(Error::Validation(format!("bin counts must be finite and >= 0, got {bad}")));
        }
        Ok(Self { binning, counts })
    }

    /// Count one event. Returns the bin it landed in.
    pub fn fill(&mut self, score: f64) -> Result<usize> {
        if !score.is_finite() {
            return Err(Error::Validation(format!("cannot bin non-finite score {score}")));
        }
        let idx = self.binning.index_of(self.binning.clip(score));
        self.counts[idx] += 1.0;
        Ok(idx)
    }

    /// The binning.
    pub fn binning(&self) -> &Binning {
        &self.binning
    }

    /// Raw bin counts, lowest score first.
    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    /// Total number of entries.
    pub fn integral(&self) -> f64 {
        self.counts.iter().sum()
    }

    /// Counts divided by the total (all zero for an empty histogram).
    pub fn normalized(&self) -> Vec<f64> {
        normalise(&self.counts)
    }

    /// Poisson errors `sqrt(n)` scaled like [`Self::normalized`].
    pub fn normalized_errors(&self) -> Vec<f64> {
        let total = self.integral();
        if total <= 0.0 {
            return vec![0.0; self.counts.len()];
        }
        self.counts.iter().map(|&n| n.sqrt() / total).collect()
    }
}

/// Normalise a histogram to unit area. Returns zero-vector if integral ≤ 0.
pub(crate) fn normalise(h: &[f64]) -> Vec<f64> {
    let sum: f64 = h.iter().copied().sum();
    if sum <= 0.0 {
        return vec![0.0; h.len()];
    }
    h.iter().map(|&v| v / sum).collect()
}

/// Signal and background response of one classifier configuration.
///
/// Both histograms share one [`Binning`] by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponsePair {
    /// Signal-class histogram
    pub signal: ScoreHistogram,
    /// Background-class histogram
    pub background: ScoreHistogram,
}

impl ResponsePair {
    /// Two empty histograms over the same binning.
    pub fn new(binning: Binning) -> Self {
        Self { signal: ScoreHistogram::new(binning), background: ScoreHistogram::new(binning) }
    }

    /// Pair two filled histograms, checking that their binning agrees.
    pub fn from_histograms(signal: ScoreHistogram, background: ScoreHistogram) -> Result<Self> {
        if signal.binning() != background.binning() {
            return Err(Error::Validation(format!(
                "signal binning {:?} differs from background binning {:?}",
                signal.binning(),
                background.binning()
            )));
        }
        Ok(Self { signal, background })
    }

    /// Count one event of `class`.
    pub fn fill(&mut self, score: f64, class: EventClass) -> Result<usize> {
        match class {
            EventClass::Signal => self.signal.fill(score),
            EventClass::Background => self.background.fill(score),
        }
    }

    /// Shared binning.
    pub fn binning(&self) -> &Binning {
        self.signal.binning()
    }

    /// Run the ROC / figure-of-merit scan over this pair.
    pub fn scan(&self, weights: &Weights, metrics: MetricSet) -> Result<RocScan> {
        scan(
            self.signal.counts(),
            self.background.counts(),
            &self.binning().low_edges(),
            weights,
            metrics,
        )
    }
}
