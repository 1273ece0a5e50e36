//! Results collected over one report run.

use serde::{Deserialize, Serialize};

use crate::result::ClassifierResult;
use crate::roc::RocPoint;
use crate::select::Selector;

/// A result together with the ROC polyline it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedConfig {
    /// Scalars and metadata
    pub result: ClassifierResult,
    /// ROC curve, starting at (0, 0)
    pub curve: Vec<RocPoint>,
}

/// Every configuration evaluated in a run, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    entries: Vec<EvaluatedConfig>,
}

impl ResultSet {
    /// Empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one evaluated configuration.
    pub fn push(&mut self, result: ClassifierResult, curve: Vec<RocPoint>) {
        self.entries.push(EvaluatedConfig { result, curve });
    }

    /// Number of configurations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was evaluated.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in evaluation order.
    pub fn entries(&self) -> &[EvaluatedConfig] {
        &self.entries
    }

    /// Results only, cloned in evaluation order.
    pub fn results(&self) -> Vec<ClassifierResult> {
        self.entries.iter().map(|e| e.result.clone()).collect()
    }

    /// Entries whose result matches `sel`.
    pub fn select<'a>(
        &'a self,
        sel: &'a Selector,
    ) -> impl Iterator<Item = &'a EvaluatedConfig> + 'a {
        self.entries.iter().filter(move |e| sel.matches(&e.result))
    }
}
