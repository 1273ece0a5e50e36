//! mvaperf CLI

mod config;
mod pipeline;
mod report;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use mvaperf_core::{Binning, ClassifierResult, MetricSet, Weights};
use mvaperf_sources::{ScoreFormat, TrainingTags};
use mvaperf_viz::{response_artifact, roc_artifact};
use mvaperf_viz_render::config::{VizConfig, resolve_config};

use crate::config::ReportConfig;

#[derive(Parser)]
#[command(name = "mvaperf")]
#[command(about = "mvaperf - ROC curves and figures of merit for classifier outputs")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate every source of a report config and write plots, results and rankings
    Report {
        /// Report config (YAML, or JSON by extension)
        #[arg(short, long)]
        config: PathBuf,

        /// Output directory. Overrides `out_dir` from the config.
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Image formats (comma-separated). Overrides `formats` from the config.
        #[arg(long, value_delimiter = ',')]
        format: Vec<String>,

        /// Viz config YAML. Overrides `viz` from the config.
        #[arg(long)]
        viz: Option<PathBuf>,
    },

    /// Evaluate a single score file
    Evaluate {
        /// Score file
        #[arg(short, long)]
        input: PathBuf,

        /// Score file layout
        #[arg(long, value_enum)]
        format: InputFormat,

        /// Histogram lower edge
        #[arg(long, allow_hyphen_values = true)]
        xmin: f64,

        /// Histogram upper edge
        #[arg(long, allow_hyphen_values = true)]
        xmax: f64,

        /// Number of bins
        #[arg(long, default_value = "1000")]
        nbins: usize,

        /// Figures of merit to track
        #[arg(long, value_enum, default_value = "yields")]
        metrics: MetricsArg,

        /// Signal weight
        #[arg(long)]
        signal_weight: Option<f64>,

        /// Background weight
        #[arg(long)]
        background_weight: Option<f64>,

        /// split-halves: events per class
        #[arg(long, default_value = "21158")]
        events_per_class: usize,

        /// split-halves: whitespace tokens per line
        #[arg(long, default_value = "1")]
        columns: usize,

        /// split-halves: token holding the score
        #[arg(long, default_value = "0")]
        score_column: usize,

        /// labelled: header lines to skip
        #[arg(long, default_value = "2")]
        header_lines: usize,

        /// label-first-csv: label marking signal events
        #[arg(long, default_value = "1.0")]
        signal_label: String,

        /// Classifier name shown in plots
        #[arg(long, default_value = "Classifier")]
        classifier: String,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write `<config>_Output.svg` and `<config>_ROC.svg` here
        #[arg(long)]
        plots: Option<PathBuf>,

        /// Viz config YAML for `--plots`
        #[arg(long)]
        viz: Option<PathBuf>,
    },

    /// Render a plot artifact JSON to SVG/PNG/PDF
    Render {
        /// Artifact JSON
        #[arg(short, long)]
        input: PathBuf,

        /// Artifact kind (response, roc, roc_overlay, bar_summary, sideways_summary)
        #[arg(long)]
        kind: String,

        /// Output image; format from the extension
        #[arg(short, long)]
        output: PathBuf,

        /// Viz config YAML
        #[arg(long)]
        viz: Option<PathBuf>,
    },

    /// Print version information
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum InputFormat {
    Labelled,
    SplitHalves,
    LabelFirstCsv,
}

#[derive(Clone, Copy, ValueEnum)]
enum MetricsArg {
    Yields,
    Full,
}

impl From<MetricsArg> for MetricSet {
    fn from(m: MetricsArg) -> Self {
        match m {
            MetricsArg::Yields => MetricSet::Yields,
            MetricsArg::Full => MetricSet::Full,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Report { config, out_dir, format, viz } => {
            cmd_report(&config, out_dir, format, viz)
        }
        Commands::Evaluate {
            input,
            format,
            xmin,
            xmax,
            nbins,
            metrics,
            signal_weight,
            background_weight,
            events_per_class,
            columns,
            score_column,
            header_lines,
            signal_label,
            classifier,
            output,
            plots,
            viz,
        } => {
            let format = match format {
                InputFormat::Labelled => ScoreFormat::Labelled { header_lines },
                InputFormat::SplitHalves => {
                    ScoreFormat::SplitHalves { events_per_class, columns, score_column }
                }
                InputFormat::LabelFirstCsv => ScoreFormat::LabelFirstCsv { signal_label },
            };
            let defaults = Weights::default();
            let weights = Weights::new(
                signal_weight.unwrap_or(defaults.signal),
                background_weight.unwrap_or(defaults.background),
            )?;
            let binning = Binning::new(nbins, xmin, xmax)?;
            cmd_evaluate(
                &input,
                &format,
                binning,
                &weights,
                metrics.into(),
                &classifier,
                output.as_ref(),
                plots.as_deref(),
                viz.as_deref(),
            )
        }
        Commands::Render { input, kind, output, viz } => {
            cmd_render(&input, &kind, &output, viz.as_deref())
        }
        Commands::Version => {
            println!("mvaperf {}", mvaperf_core::VERSION);
            Ok(())
        }
    }
}

fn load_viz(path: Option<&Path>) -> Result<VizConfig> {
    let Some(path) = path else {
        return Ok(VizConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read viz config {}", path.display()))?;
    resolve_config(Some(&text)).with_context(|| format!("invalid viz config {}", path.display()))
}

fn write_json(output: Option<&PathBuf>, value: serde_json::Value) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&value)?)?;
    } else {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}

fn cmd_report(
    config_path: &Path,
    out_dir: Option<PathBuf>,
    format: Vec<String>,
    viz: Option<PathBuf>,
) -> Result<()> {
    let cfg = ReportConfig::load(config_path)?;
    let formats = if format.is_empty() {
        cfg.formats.clone()
    } else {
        config::check_formats(&format)?;
        format
    };
    let out_dir = out_dir.unwrap_or_else(|| cfg.out_dir.clone());
    let viz = load_viz(viz.as_deref().or(cfg.viz.as_deref()))?;

    let eval = pipeline::run(&cfg)?;
    if eval.set.is_empty() {
        tracing::warn!("no configurations were evaluated");
    }
    report::write_report(&eval, &cfg, &out_dir, &formats, &viz)?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_evaluate(
    input: &Path,
    format: &ScoreFormat,
    binning: Binning,
    weights: &Weights,
    metrics: MetricSet,
    classifier: &str,
    output: Option<&PathBuf>,
    plots: Option<&Path>,
    viz: Option<&Path>,
) -> Result<()> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("no file name in {}", input.display()))?;
    let mut result = ClassifierResult::new("cli", stem, classifier, "", "");
    if let Ok(tags) = TrainingTags::parse_stem(stem) {
        tags.apply(&mut result);
    }

    let (pair, scan) =
        pipeline::evaluate_file(input, format, binning, weights, metrics, &mut result)?;
    tracing::info!(config = %result.config_name, auc = result.auc, "evaluated");

    if let Some(dir) = plots {
        let viz = load_viz(viz)?;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        let response = serde_json::to_string(&response_artifact(&pair, &result))?;
        let roc = serde_json::to_string(&roc_artifact(&scan.points, &result))?;
        let name = &result.config_name;
        let outputs = [
            (response, "response", format!("{name}_Output.svg")),
            (roc, "roc", format!("{name}_ROC.svg")),
        ];
        for (json, kind, file) in outputs {
            mvaperf_viz_render::render_to_file(&json, kind, &dir.join(&file), &viz)
                .with_context(|| format!("failed to render {file}"))?;
        }
    }

    let output_json = serde_json::json!({
        "result": result,
        "curve": scan.points,
    });
    write_json(output, output_json)
}

fn cmd_render(input: &Path, kind: &str, output: &Path, viz: Option<&Path>) -> Result<()> {
    let json = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let viz = load_viz(viz)?;
    mvaperf_viz_render::render_to_file(&json, kind, output, &viz)
        .with_context(|| format!("failed to render {}", output.display()))?;
    tracing::info!(output = %output.display(), kind, "rendered");
    Ok(())
}
