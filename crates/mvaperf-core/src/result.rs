//! Per-configuration classifier result.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::metrics::{BestCut, FigureOfMerit, FigureOfMeritMaxima};
use crate::roc::RocScan;
use crate::{Error, Result};

/// Size of the training sample, e.g. `338K`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingEvents {
    /// Label as written in file names and legends
    pub label: String,
    /// Number of events
    pub count: u64,
}

impl TrainingEvents {
    /// Parse `1K`, `338K`, `2M` or a plain integer.
    pub fn parse(label: &str) -> Result<Self> {
        let s = label.trim();
        let (digits, scale) = match s.chars().last() {
            Some('K') | Some('k') => (&s[..s.len() - 1], 1_000.0),
            Some('M') | Some('m') => (&s[..s.len() - 1], 1_000_000.0),
            _ => (s, 1.0),
        };
        let value: f64 = digits
            .parse()
            .map_err(|_| Error::Validation(format!("invalid training event count `{label}`")))?;
        if !value.is_finite() || value < 0.0 {
            return Err(Error::Validation(format!("invalid training event count `{label}`")));
        }
        Ok(Self { label: s.to_string(), count: (value * scale).round() as u64 })
    }
}

/// Neural-network architecture: hidden layers × nodes per layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Structure {
    /// Hidden layers
    pub layers: u32,
    /// Nodes per layer
    pub nodes: u32,
}

impl Structure {
    /// Parse `2x15`.
    pub fn parse(s: &str) -> Result<Self> {
        let (l, n) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| Error::Validation(format!("invalid structure `{s}`, expected LxN")))?;
        let layers =
            l.parse().map_err(|_| Error::Validation(format!("invalid layer count in `{s}`")))?;
        let nodes =
            n.parse().map_err(|_| Error::Validation(format!("invalid node count in `{s}`")))?;
        Ok(Self { layers, nodes })
    }

    /// `LxN` key used in file names and summary categories.
    pub fn key(&self) -> String {
        format!("{}x{}", self.layers, self.nodes)
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\u{00D7}{}", self.layers, self.nodes)
    }
}

/// Everything known about one evaluated classifier configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierResult {
    /// Data source this configuration came from
    pub source: String,
    /// Name used for output files, e.g. `AF_2x15_338K`
    pub config_name: String,
    /// Classifier name, e.g. `NeuroBGD`
    pub classifier: String,
    /// Short feature-set tag, e.g. `AF`
    pub features_tag: String,
    /// Feature-set title, e.g. `All Features`
    pub features_title: String,
    /// Training sample size, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_events: Option<TrainingEvents>,
    /// Network architecture, if applicable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<Structure>,
    /// Training wall time in seconds, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_time_s: Option<f64>,
    /// AUC quoted by whoever produced the score file, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_auc: Option<f64>,
    /// Raw signal entries
    pub n_signal: f64,
    /// Raw background entries
    pub n_background: f64,
    /// AUC from the histogram scan
    pub auc: f64,
    /// Best cut per figure of merit
    pub maxima: FigureOfMeritMaxima,
}

impl ClassifierResult {
    /// A result with metadata only; scan-derived fields start empty.
    pub fn new(
        source: impl Into<String>,
        config_name: impl Into<String>,
        classifier: impl Into<String>,
        features_tag: impl Into<String>,
        features_title: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            config_name: config_name.into(),
            classifier: classifier.into(),
            features_tag: features_tag.into(),
            features_title: features_title.into(),
            training_events: None,
            structure: None,
            training_time_s: None,
            reference_auc: None,
            n_signal: 0.0,
            n_background: 0.0,
            auc: 0.0,
            maxima: FigureOfMeritMaxima::default(),
        }
    }

    /// Copy the scan-derived quantities in.
    pub fn record_scan(&mut self, scan: &RocScan, n_signal: f64, n_background: f64) {
        self.auc = scan.auc;
        self.maxima = scan.maxima.clone();
        self.n_signal = n_signal;
        self.n_background = n_background;
    }

    /// Best cut for `fom`, if it was tracked and reached.
    pub fn best(&self, fom: FigureOfMerit) -> Option<&BestCut> {
        self.maxima.get(fom)
    }

    /// Classifier name plus architecture, e.g. `NeuroBGD 2×15`.
    pub fn classifier_title(&self) -> String {
        match &self.structure {
            Some(s) => format!("{} {}", self.classifier, s),
            None => self.classifier.clone(),
        }
    }

    /// AUC with three decimals.
    pub fn auc_label(&self) -> String {
        format!("{:.3}", self.auc)
    }

    /// Training events label, if known.
    pub fn training_events_label(&self) -> Option<&str> {
        self.training_events.as_ref().map(|t| t.label.as_str())
    }
}
