//! Report configuration (`mvaperf report --config <file>`).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use mvaperf_core::{MetricSet, Selector, Weights};
use mvaperf_sources::ScoreFormat;
use mvaperf_viz::{BarSummarySpec, OverlaySpec, SidewaysSpec};
use serde::Deserialize;

fn default_out_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_nbins() -> usize {
    1000
}

fn default_formats() -> Vec<String> {
    vec!["svg".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_extension() -> String {
    "csv".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Output directory, relative to the config file.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    /// Default bin count for every source.
    #[serde(default = "default_nbins")]
    pub nbins: usize,
    #[serde(default)]
    pub weights: Weights,
    #[serde(default)]
    pub metrics: MetricSet,
    /// Image formats to render (`svg`, `png`, `pdf`).
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
    /// Viz YAML (theme + overrides).
    #[serde(default)]
    pub viz: Option<PathBuf>,
    /// Emit `<config>_Output` and `<config>_ROC` for every configuration.
    #[serde(default = "default_true")]
    pub per_config_plots: bool,
    pub sources: Vec<SourceConfig>,
    #[serde(default)]
    pub overlays: Vec<OverlaySpec>,
    #[serde(default)]
    pub summaries: Vec<BarSummarySpec>,
    #[serde(default)]
    pub sideways: Option<SidewaysSpec>,
}

/// One classifier family and where its score files live.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub name: String,
    pub classifier: String,
    pub format: ScoreFormat,
    /// Histogram range `[xmin, xmax]`.
    pub range: [f64; 2],
    #[serde(default)]
    pub nbins: Option<usize>,
    #[serde(default)]
    pub metrics: Option<MetricSet>,
    #[serde(default)]
    pub files: Vec<FileEntry>,
    #[serde(default)]
    pub directory: Option<DirectoryEntry>,
    /// First matching override wins.
    #[serde(default)]
    pub range_overrides: Vec<RangeOverride>,
    /// Configurations matching any of these are not evaluated.
    #[serde(default)]
    pub exclude: Vec<Selector>,
}

/// An explicitly listed score file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileEntry {
    pub path: PathBuf,
    /// Feature-set tag
    pub features: String,
    #[serde(default)]
    pub features_title: Option<String>,
    /// Defaults to the file stem.
    #[serde(default)]
    pub config_name: Option<String>,
    #[serde(default)]
    pub training_events: Option<String>,
    /// `LxN`
    #[serde(default)]
    pub structure: Option<String>,
    #[serde(default)]
    pub training_time_s: Option<f64>,
    #[serde(default)]
    pub reference_auc: Option<f64>,
    #[serde(default)]
    pub range: Option<[f64; 2]>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectoryEntry {
    pub path: PathBuf,
    #[serde(default = "default_extension")]
    pub extension: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangeOverride {
    pub select: Selector,
    pub range: [f64; 2],
}

impl SourceConfig {
    /// Range for a configuration: the first matching override, else `fallback`.
    pub fn range_for(&self, r: &mvaperf_core::ClassifierResult, fallback: [f64; 2]) -> [f64; 2] {
        self.range_overrides.iter().find(|o| o.select.matches(r)).map_or(fallback, |o| o.range)
    }

    pub fn is_excluded(&self, r: &mvaperf_core::ClassifierResult) -> bool {
        self.exclude.iter().any(|s| s.matches(r))
    }
}

impl ReportConfig {
    /// Read a YAML config (JSON when the extension is `.json`) and resolve
    /// every relative path against the config's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let mut cfg: ReportConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&text)
                .with_context(|| format!("invalid JSON config {}", path.display()))?,
            _ => serde_yaml_ng::from_str(&text)
                .with_context(|| format!("invalid YAML config {}", path.display()))?,
        };
        let base = path.parent().unwrap_or(Path::new(""));
        cfg.resolve_paths(base);
        cfg.validate()?;
        Ok(cfg)
    }

    fn resolve_paths(&mut self, base: &Path) {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        join(&mut self.out_dir);
        if let Some(v) = self.viz.as_mut() {
            join(v);
        }
        for src in &mut self.sources {
            for f in &mut src.files {
                join(&mut f.path);
            }
            if let Some(d) = src.directory.as_mut() {
                join(&mut d.path);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            bail!("config declares no sources");
        }
        self.weights.validate()?;
        for src in &self.sources {
            if src.files.is_empty() && src.directory.is_none() {
                bail!("source `{}` lists no files and no directory", src.name);
            }
            if src.nbins.unwrap_or(self.nbins) == 0 {
                bail!("source `{}`: nbins must be > 0", src.name);
            }
            src.format.validate().with_context(|| format!("source `{}`", src.name))?;
        }
        let mut names: Vec<&str> = self.sources.iter().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        if let Some(w) = names.windows(2).find(|w| w[0] == w[1]) {
            bail!("duplicate source name `{}`", w[0]);
        }
        check_formats(&self.formats)
    }
}

/// Every requested image format must be compiled in.
pub fn check_formats(formats: &[String]) -> Result<()> {
    let supported = mvaperf_viz_render::supported_formats();
    for f in formats {
        if !supported.contains(&f.as_str()) {
            bail!(
                "output format `{f}` is not available in this build (supported: {})",
                supported.join(", ")
            );
        }
    }
    Ok(())
}
