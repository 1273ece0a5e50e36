//! SVG rendering of mvaperf plot artifacts, with optional PNG and PDF output.
//!
//! Artifacts arrive as JSON (as written under `artifacts/` by a report run)
//! together with their kind, see [`KINDS`].

pub mod canvas;
pub mod color;
pub mod config;
pub mod font;
pub mod header;
pub mod layout;
pub mod output;
pub mod plots;
pub mod primitives;
pub mod text;
pub mod theme;

use config::VizConfig;
use thiserror::Error;

/// Artifact kinds accepted by [`render_svg`].
pub const KINDS: &[&str] = &["response", "roc", "roc_overlay", "bar_summary", "sideways_summary"];

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown artifact kind: {0}")]
    UnknownKind(String),
    #[error("unsupported output format: {0}")]
    UnknownFormat(String),
    #[error("deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("font error: {0}")]
    Font(String),
    #[error("layout error: {0}")]
    Layout(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "png")]
    #[error("PNG encoding error: {0}")]
    Png(String),
    #[cfg(feature = "pdf")]
    #[error("PDF conversion error: {0}")]
    Pdf(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;

/// Render an artifact JSON to SVG string.
pub fn render_svg(artifact_json: &str, kind: &str, config: &VizConfig) -> Result<String> {
    let svg = match kind {
        "response" => {
            let art: mvaperf_viz::ResponseArtifact = serde_json::from_str(artifact_json)?;
            plots::response::render(&art, config)?
        }
        "roc" => {
            let art: mvaperf_viz::RocArtifact = serde_json::from_str(artifact_json)?;
            plots::roc::render(&art, config)?
        }
        "roc_overlay" => {
            let art: mvaperf_viz::RocOverlayArtifact = serde_json::from_str(artifact_json)?;
            plots::roc::render_overlay(&art, config)?
        }
        "bar_summary" => {
            let art: mvaperf_viz::BarSummaryArtifact = serde_json::from_str(artifact_json)?;
            plots::bars::render(&art, config)?
        }
        "sideways_summary" => {
            let art: mvaperf_viz::SidewaysSummaryArtifact = serde_json::from_str(artifact_json)?;
            plots::sideways::render(&art, config)?
        }
        other => return Err(RenderError::UnknownKind(other.to_string())),
    };
    Ok(svg)
}

/// Output formats this build can produce.
pub fn supported_formats() -> Vec<&'static str> {
    let mut formats = vec!["svg"];
    if cfg!(feature = "png") {
        formats.push("png");
    }
    if cfg!(feature = "pdf") {
        formats.push("pdf");
    }
    formats
}

/// Render an artifact JSON to bytes in the specified format.
pub fn render_to_bytes(
    artifact_json: &str,
    kind: &str,
    format: &str,
    config: &VizConfig,
) -> Result<Vec<u8>> {
    let svg = render_svg(artifact_json, kind, config)?;
    match format {
        "svg" => Ok(svg.into_bytes()),
        #[cfg(feature = "png")]
        "png" => {
            let fonts = font::FontHandle::from_config(&config.font)?;
            output::png::svg_to_png(&svg, config.output.dpi, &fonts)
        }
        #[cfg(feature = "pdf")]
        "pdf" => {
            let fonts = font::FontHandle::from_config(&config.font)?;
            output::pdf::svg_to_pdf(&svg, &fonts)
        }
        other => Err(RenderError::UnknownFormat(other.to_string())),
    }
}

/// Render an artifact JSON to a file (format inferred from extension).
pub fn render_to_file(
    artifact_json: &str,
    kind: &str,
    path: &std::path::Path,
    config: &VizConfig,
) -> Result<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("svg");
    if ext == "svg" {
        let svg = render_svg(artifact_json, kind, config)?;
        return output::svg::save_svg(&svg, path);
    }
    let bytes = render_to_bytes(artifact_json, kind, ext, config)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}
