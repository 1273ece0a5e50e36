use std::path::Path;

use mvaperf_core::{ClassifierResult, Error, Result, Structure, TrainingEvents};
use serde::{Deserialize, Serialize};

/// Long title for a feature-set tag. Unknown tags are their own title.
pub fn features_title(tag: &str) -> String {
    match tag {
        "AF" => "All Features",
        "BF" => "Basic Features",
        "EF" => "Extended Features",
        "20F" => "20 Features",
        other => other,
    }
    .to_string()
}

/// Configuration of one neural-network training run, parsed from a file stem
/// of the form `<features>_<layers>x<nodes>_<events>[_<seconds>s]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingTags {
    /// Feature-set tag, e.g. `AF`
    pub features_tag: String,
    /// Feature-set title, e.g. `All Features`
    pub features_title: String,
    /// Network architecture
    pub structure: Structure,
    /// Training sample size
    pub training_events: TrainingEvents,
    /// Training wall time, when the stem carries it
    pub training_time_s: Option<f64>,
}

impl TrainingTags {
    /// Parse a bare stem such as `AF_2x15_338K_812.5s`.
    pub fn parse_stem(stem: &str) -> Result<Self> {
        let parts: Vec<&str> = stem.split('_').collect();
        if !(3..=4).contains(&parts.len()) || parts[0].is_empty() {
            return Err(Error::Validation(format!(
                "file name `{stem}` does not match <features>_<layers>x<nodes>_<events>[_<seconds>s]"
            )));
        }
        let structure = Structure::parse(parts[1])?;
        let training_events = TrainingEvents::parse(parts[2])?;
        let training_time_s = match parts.get(3) {
            None => None,
            Some(t) => {
                let secs = t
                    .strip_suffix('s')
                    .and_then(|v| v.parse::<f64>().ok())
                    .filter(|v| v.is_finite() && *v >= 0.0)
                    .ok_or_else(|| {
                        Error::Validation(format!("invalid training time `{t}` in `{stem}`"))
                    })?;
                Some(secs)
            }
        };
        Ok(Self {
            features_tag: parts[0].to_string(),
            features_title: features_title(parts[0]),
            structure,
            training_events,
            training_time_s,
        })
    }

    /// Parse the stem of `path`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let stem = path.file_stem().and_then(|s| s.to_str()).ok_or_else(|| {
            Error::Validation(format!("no usable file name in {}", path.display()))
        })?;
        Self::parse_stem(stem)
    }

    /// `<features>_<layers>x<nodes>_<events>`
    pub fn config_name(&self) -> String {
        format!("{}_{}_{}", self.features_tag, self.structure.key(), self.training_events.label)
    }

    /// Copy the tags onto a result.
    pub fn apply(&self, r: &mut ClassifierResult) {
        r.features_tag = self.features_tag.clone();
        r.features_title = self.features_title.clone();
        r.structure = Some(self.structure);
        r.training_events = Some(self.training_events.clone());
        r.training_time_s = self.training_time_s;
        r.config_name = self.config_name();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn full_stem() {
        let t = TrainingTags::parse_stem("AF_2x15_338K_812.5s").unwrap();
        assert_eq!(t.features_title, "All Features");
        assert_eq!(t.structure, Structure { layers: 2, nodes: 15 });
        assert_eq!(t.training_events.count, 338_000);
        assert_eq!(t.training_time_s, Some(812.5));
        assert_eq!(t.config_name(), "AF_2x15_338K");
    }

    #[test]
    fn time_is_optional() {
        let t = TrainingTags::from_path(&PathBuf::from("out/BF_11x300_1K.csv")).unwrap();
        assert_eq!(t.features_title, "Basic Features");
        assert_eq!(t.training_time_s, None);
    }

    #[test]
    fn unknown_feature_tag_is_kept() {
        let t = TrainingTags::parse_stem("XF_2x15_1K").unwrap();
        assert_eq!(t.features_title, "XF");
        assert_eq!(features_title("20F"), "20 Features");
        assert_eq!(features_title("EF"), "Extended Features");
    }

    #[test]
    fn bad_stems_are_rejected() {
        assert!(TrainingTags::parse_stem("AF_2x15").is_err());
        assert!(TrainingTags::parse_stem("AF_2-15_1K").is_err());
        assert!(TrainingTags::parse_stem("AF_2x15_1K_fast").is_err());
        assert!(TrainingTags::parse_stem("AF_2x15_1K_3s_extra").is_err());
    }

    #[test]
    fn apply_sets_result_metadata() {
        let t = TrainingTags::parse_stem("EF_5x300_338K_40s").unwrap();
        let mut r = ClassifierResult::new("neurobgd", "", "NeuroBGD", "", "");
        t.apply(&mut r);
        assert_eq!(r.config_name, "EF_5x300_338K");
        assert_eq!(r.features_title, "Extended Features");
        assert_eq!(r.training_time_s, Some(40.0));
        assert_eq!(r.classifier_title(), "NeuroBGD 5\u{00D7}300");
    }
}
