//! Evaluate every configured score file into a [`ResultSet`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mvaperf_core::{
    Binning, ClassifierResult, MetricSet, ResponsePair, ResultSet, RocScan, Structure,
    TrainingEvents, Weights,
};
use mvaperf_sources::{ScoreFormat, TrainingTags, discover_files, features_title, fill_file};
use mvaperf_viz::{ResponseArtifact, response_artifact};

use crate::config::{FileEntry, ReportConfig, SourceConfig};

/// Everything a report run evaluated, in evaluation order.
#[derive(Debug, Default)]
pub struct Evaluation {
    pub set: ResultSet,
    /// Response distributions, parallel to `set`.
    pub responses: Vec<ResponseArtifact>,
}

/// A score file together with the result skeleton it will fill.
struct Job {
    path: PathBuf,
    result: ClassifierResult,
    range: [f64; 2],
}

/// Fill and scan one file.
pub fn evaluate_file(
    path: &Path,
    format: &ScoreFormat,
    binning: Binning,
    weights: &Weights,
    metrics: MetricSet,
    result: &mut ClassifierResult,
) -> Result<(ResponsePair, RocScan)> {
    let pair = fill_file(path, format, binning)
        .with_context(|| format!("failed to read scores from {}", path.display()))?;
    let scan = pair
        .scan(weights, metrics)
        .with_context(|| format!("ROC scan failed for {}", path.display()))?;
    result.record_scan(&scan, pair.signal.integral(), pair.background.integral());
    if let Some(reference) = result.reference_auc {
        tracing::debug!(
            config = %result.config_name,
            auc = result.auc,
            reference,
            delta = result.auc - reference,
            "computed AUC vs. quoted AUC"
        );
    }
    Ok((pair, scan))
}

/// Run every source of `cfg`. Any fatal input error aborts the whole run.
pub fn run(cfg: &ReportConfig) -> Result<Evaluation> {
    let mut out = Evaluation::default();
    for source in &cfg.sources {
        let nbins = source.nbins.unwrap_or(cfg.nbins);
        let metrics = source.metrics.unwrap_or(cfg.metrics);
        let jobs = collect_jobs(source)?;
        tracing::info!(source = %source.name, n = jobs.len(), "evaluating source");

        for mut job in jobs {
            let [lo, hi] = job.range;
            let binning = Binning::new(nbins, lo, hi)
                .with_context(|| format!("bad range for {}", job.result.config_name))?;
            let (pair, scan) = evaluate_file(
                &job.path,
                &source.format,
                binning,
                &cfg.weights,
                metrics,
                &mut job.result,
            )?;
            tracing::info!(
                config = %job.result.config_name,
                auc = job.result.auc,
                n_signal = job.result.n_signal,
                n_background = job.result.n_background,
                "evaluated"
            );
            out.responses.push(response_artifact(&pair, &job.result));
            out.set.push(job.result, scan.points);
        }
    }
    Ok(out)
}

fn collect_jobs(source: &SourceConfig) -> Result<Vec<Job>> {
    let mut jobs = Vec::new();
    for entry in &source.files {
        let result = file_result(source, entry)?;
        let range = source.range_for(&result, entry.range.unwrap_or(source.range));
        jobs.push(Job { path: entry.path.clone(), result, range });
    }

    if let Some(dir) = &source.directory {
        let found = discover_files(&dir.path, &dir.extension)
            .with_context(|| format!("failed to list {}", dir.path.display()))?;
        for path in found.unwrap_or_default() {
            let tags = match TrainingTags::from_path(&path) {
                Ok(t) => t,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "skipping file with unrecognised name"
                    );
                    continue;
                }
            };
            let mut result = ClassifierResult::new(
                &source.name,
                tags.config_name(),
                &source.classifier,
                &tags.features_tag,
                &tags.features_title,
            );
            tags.apply(&mut result);
            let range = source.range_for(&result, source.range);
            jobs.push(Job { path, result, range });
        }
    }

    jobs.retain(|j| {
        let excluded = source.is_excluded(&j.result);
        if excluded {
            tracing::info!(config = %j.result.config_name, "excluded by config");
        }
        !excluded
    });
    Ok(jobs)
}

fn file_result(source: &SourceConfig, entry: &FileEntry) -> Result<ClassifierResult> {
    let config_name = match &entry.config_name {
        Some(n) => n.clone(),
        None => entry
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(str::to_string)
            .with_context(|| format!("no file name in {}", entry.path.display()))?,
    };
    let title = entry.features_title.clone().unwrap_or_else(|| features_title(&entry.features));
    let mut r = ClassifierResult::new(
        &source.name,
        config_name,
        &source.classifier,
        &entry.features,
        title,
    );
    r.training_events = entry.training_events.as_deref().map(TrainingEvents::parse).transpose()?;
    r.structure = entry.structure.as_deref().map(Structure::parse).transpose()?;
    r.training_time_s = entry.training_time_s;
    r.reference_auc = entry.reference_auc;
    Ok(r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DirectoryEntry;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn tmp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        let pid = std::process::id();
        std::env::temp_dir().join(format!("mvaperf_pipeline_{pid}_{nanos}_{name}"))
    }

    fn source(dir: Option<PathBuf>) -> SourceConfig {
        SourceConfig {
            name: "neurobgd".into(),
            classifier: "NeuroBGD".into(),
            format: ScoreFormat::split_halves(2),
            range: [-0.5, 1.5],
            nbins: Some(10),
            metrics: None,
            files: Vec::new(),
            directory: dir.map(|path| DirectoryEntry { path, extension: "csv".into() }),
            range_overrides: Vec::new(),
            exclude: Vec::new(),
        }
    }

    #[test]
    fn directory_jobs_carry_tags_and_skip_strangers() {
        let dir = tmp_dir("jobs");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("AF_2x15_1K_3.5s.csv"), "0.1\n0.2\n0.8\n0.9\n").unwrap();
        std::fs::write(dir.join("readme.csv"), "x\n").unwrap();

        let jobs = collect_jobs(&source(Some(dir.clone()))).unwrap();
        assert_eq!(jobs.len(), 1);
        let r = &jobs[0].result;
        assert_eq!(r.config_name, "AF_2x15_1K");
        assert_eq!(r.features_title, "All Features");
        assert_eq!(r.training_time_s, Some(3.5));
        assert_eq!(r.source, "neurobgd");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_directory_gives_no_jobs() {
        let jobs = collect_jobs(&source(Some(tmp_dir("absent")))).unwrap();
        assert!(jobs.is_empty());
    }

    #[test]
    fn listed_file_metadata_is_parsed() {
        let mut src = source(None);
        src.files.push(FileEntry {
            path: PathBuf::from("Data/nbexpert_Top10.txt"),
            features: "10".into(),
            features_title: Some("Top 10 Features".into()),
            config_name: None,
            training_events: Some("338K".into()),
            structure: Some("2x15".into()),
            training_time_s: None,
            reference_auc: Some(0.79),
            range: Some([-1.0, 1.0]),
        });
        let jobs = collect_jobs(&src).unwrap();
        let r = &jobs[0].result;
        assert_eq!(r.config_name, "nbexpert_Top10");
        assert_eq!(r.structure, Some(Structure { layers: 2, nodes: 15 }));
        assert_eq!(r.training_events.as_ref().unwrap().count, 338_000);
        assert_eq!(jobs[0].range, [-1.0, 1.0]);
    }
}
