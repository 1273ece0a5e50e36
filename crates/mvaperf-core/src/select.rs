//! Declarative result filters used by overlays, range overrides and exclusions.

use serde::{Deserialize, Serialize};

use crate::result::ClassifierResult;

/// Conjunction of optional field matches. An empty selector matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Selector {
    /// Source name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Classifier name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    /// Feature-set tag (`AF`) or title (`All Features`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<String>,
    /// Hidden layers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layers: Option<u32>,
    /// Nodes per layer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<u32>,
    /// Training events label, e.g. `338K`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_events: Option<String>,
}

impl Selector {
    /// True if every field that is set agrees with `r`.
    pub fn matches(&self, r: &ClassifierResult) -> bool {
        fn eq<T: PartialEq>(want: &Option<T>, have: Option<T>) -> bool {
            want.as_ref().is_none_or(|w| have.as_ref() == Some(w))
        }

        eq(&self.source.as_deref(), Some(r.source.as_str()))
            && eq(&self.classifier.as_deref(), Some(r.classifier.as_str()))
            && self
                .features
                .as_deref()
                .is_none_or(|f| f == r.features_tag || f == r.features_title)
            && eq(&self.layers, r.structure.map(|s| s.layers))
            && eq(&self.nodes, r.structure.map(|s| s.nodes))
            && eq(&self.training_events.as_deref(), r.training_events_label())
    }
}
