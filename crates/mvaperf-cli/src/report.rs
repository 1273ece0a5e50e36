//! Write results, rankings, plot artifacts and rendered images.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mvaperf_core::ClassifierResult;
use mvaperf_viz::{
    ArtifactMeta, RankingsArtifact, bar_summary_artifact, rankings_artifact, roc_artifact,
    roc_overlay_artifact, sideways_summary_artifact,
};
use mvaperf_viz_render::config::VizConfig;
use serde::Serialize;

use crate::config::ReportConfig;
use crate::pipeline::Evaluation;

#[derive(Debug, Clone, Serialize)]
struct ResultsFile<'a> {
    schema_version: &'static str,
    meta: ArtifactMeta,
    results: &'a [ClassifierResult],
}

/// One entry of `artifacts/index.json`.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactRecord {
    /// Plot name, also the image file stem
    pub name: String,
    /// Renderer kind, as accepted by `mvaperf render --kind`
    pub kind: &'static str,
    /// Artifact JSON, relative to the output directory
    pub artifact: PathBuf,
    /// Rendered images, relative to the output directory
    pub images: Vec<PathBuf>,
}

/// Plot artifacts collected before writing.
struct Pending {
    name: String,
    kind: &'static str,
    json: String,
}

fn pending<T: Serialize>(name: String, kind: &'static str, value: &T) -> Result<Pending> {
    Ok(Pending { name, kind, json: serde_json::to_string_pretty(value)? })
}

fn write_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(value)?)
        .with_context(|| format!("failed to write {}", path.display()))
}

/// Write the full report for `eval` into `out_dir`.
pub fn write_report(
    eval: &Evaluation,
    cfg: &ReportConfig,
    out_dir: &Path,
    formats: &[String],
    viz: &VizConfig,
) -> Result<Vec<ArtifactRecord>> {
    let artifacts_dir = out_dir.join("artifacts");
    std::fs::create_dir_all(&artifacts_dir)
        .with_context(|| format!("failed to create {}", artifacts_dir.display()))?;

    let results = eval.set.results();
    write_pretty(
        &out_dir.join("results.json"),
        &ResultsFile {
            schema_version: "mvaperf_results_v0",
            meta: ArtifactMeta::default(),
            results: &results,
        },
    )?;

    let rankings = rankings_artifact(&results);
    log_rankings(&rankings);
    write_pretty(&out_dir.join("rankings.json"), &rankings)?;
    std::fs::write(out_dir.join("rankings.txt"), rankings.to_text())
        .with_context(|| format!("failed to write rankings.txt in {}", out_dir.display()))?;

    let mut plots = Vec::new();
    if cfg.per_config_plots {
        for (entry, response) in eval.set.entries().iter().zip(&eval.responses) {
            let name = &entry.result.config_name;
            plots.push(pending(format!("{name}_Output"), "response", response)?);
            let roc = roc_artifact(&entry.curve, &entry.result);
            plots.push(pending(format!("{name}_ROC"), "roc", &roc)?);
        }
    }
    for spec in &cfg.overlays {
        let overlay = roc_overlay_artifact(&eval.set, spec);
        if overlay.series.is_empty() {
            tracing::warn!(overlay = %spec.name, "selector matched no configurations");
        }
        plots.push(pending(format!("OverlayROC_{}", spec.name), "roc_overlay", &overlay)?);
    }
    for spec in &cfg.summaries {
        let summary = bar_summary_artifact(&results, spec)
            .with_context(|| format!("summary `{}`", spec.name))?;
        plots.push(pending(format!("Summary_{}", spec.name), "bar_summary", &summary)?);
    }
    if let Some(spec) = &cfg.sideways {
        let summary = sideways_summary_artifact(&results, spec).context("sideways summary")?;
        plots.push(pending(spec.name.clone(), "sideways_summary", &summary)?);
    }

    let mut index = Vec::with_capacity(plots.len());
    for plot in plots {
        let artifact = PathBuf::from("artifacts").join(format!("{}.json", plot.name));
        std::fs::write(out_dir.join(&artifact), &plot.json)
            .with_context(|| format!("failed to write {}", artifact.display()))?;

        let mut images = Vec::with_capacity(formats.len());
        for fmt in formats {
            let image = PathBuf::from(format!("{}.{fmt}", plot.name));
            mvaperf_viz_render::render_to_file(&plot.json, plot.kind, &out_dir.join(&image), viz)
                .with_context(|| format!("failed to render {}", image.display()))?;
            images.push(image);
        }
        tracing::debug!(plot = %plot.name, kind = plot.kind, "wrote plot");
        index.push(ArtifactRecord { name: plot.name, kind: plot.kind, artifact, images });
    }
    write_pretty(&artifacts_dir.join("index.json"), &index)?;

    tracing::info!(
        out_dir = %out_dir.display(),
        configs = results.len(),
        plots = index.len(),
        "report written"
    );
    Ok(index)
}

fn log_rankings(rankings: &RankingsArtifact) {
    for table in &rankings.rankings {
        tracing::info!(ranking = %table.title, "ranking");
        for e in &table.entries {
            tracing::info!(
                rank = e.rank,
                config = %e.config_name,
                classifier = %e.classifier_title,
                value = ?e.value,
                cut = ?e.cut,
                "ranked"
            );
        }
    }
}
