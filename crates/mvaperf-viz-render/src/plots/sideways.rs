use mvaperf_viz::{SidewaysSummaryArtifact, SummaryMetric};

use crate::RenderError;
use crate::canvas::Canvas;
use crate::color::{Color, series_color};
use crate::config::VizConfig;
use crate::header::{draw_header, header_height};
use crate::layout::axes::Axis;
use crate::layout::legend::{self, Legend, LegendEntry, LegendKind, LegendPosition};
use crate::layout::multi_panel::DualPanelLayout;
use crate::layout::margins::PlotArea;
use crate::plots::axes_draw::draw_axes;
use crate::plots::bars::{bar_base, value_axis};
use crate::primitives::*;

/// Minimum height of a single bar, in points.
const MIN_BAR_HEIGHT: f64 = 4.0;

/// `SidewaysSummary`: horizontal grouped bars, AUC (linear) on the left and
/// training time (log) on the right, rows grouped into feature-set sections.
pub fn render(artifact: &SidewaysSummaryArtifact, config: &VizConfig) -> crate::Result<String> {
    let n_rows = artifact.n_rows();
    let n_ser = artifact.series.len();
    if n_rows == 0 || n_ser == 0 {
        return Ok(super::empty_svg("No summary data"));
    }
    if let Some(s) =
        artifact.series.iter().find(|s| s.auc.len() != n_rows || s.training_time.len() != n_rows)
    {
        return Err(RenderError::Layout(format!(
            "{}: series `{}` does not cover {} rows",
            artifact.name, s.label, n_rows
        )));
    }

    let row_labels: Vec<String> =
        artifact.sections.iter().flat_map(|s| s.categories.iter().cloned()).collect();
    let y_axis = Axis::categories(&row_labels);

    let top = header_height(config) + config.font.size + 6.0;
    let bottom = config.font.tick_size + config.font.label_size + 33.0;
    let per_row = n_ser as f64 * MIN_BAR_HEIGHT / config.bars.group_width.clamp(0.05, 1.0) + 4.0;
    let min_plot_h = n_rows as f64 * per_row;
    let fig_h = config.figure.height.max(top + bottom + min_plot_h);
    let mut canvas = Canvas::new(config.figure.width, fig_h, &config.font)?;

    let tick_style = TextStyle { size: config.font.tick_size, ..Default::default() };
    let max_row_w = row_labels
        .iter()
        .map(|l| canvas.measure_text(l, &tick_style).width)
        .fold(0.0_f64, f64::max);
    let left = 15.0 + config.font.label_size + 8.0 + max_row_w + 8.0;
    let width = (config.figure.width - left - 15.0).max(100.0);
    let panels = DualPanelLayout::new(left, top, width, fig_h - top - bottom, 14.0, 0.5);

    let auc: Vec<f64> =
        artifact.series.iter().flat_map(|s| s.auc.iter().flatten()).copied().collect();
    let time: Vec<f64> =
        artifact.series.iter().flat_map(|s| s.training_time.iter().flatten()).copied().collect();
    let auc_axis = value_axis(&auc, Some(artifact.auc_range), false)
        .with_label(SummaryMetric::Auc.axis_label());
    let time_axis = value_axis(&time, Some(artifact.time_range), true)
        .with_label(SummaryMetric::TrainingTime.axis_label());

    draw_header(&mut canvas, &panels.left, config);
    draw_axes(&mut canvas, &panels.left, &auc_axis, &y_axis, config);
    let shared_rows = y_axis.clone().without_tick_labels();
    draw_axes(&mut canvas, &panels.right, &time_axis, &shared_rows, config);

    let palette = config.palette_colors();
    let panel_values = [
        (&panels.left, &auc_axis, artifact.series.iter().map(|s| &s.auc).collect::<Vec<_>>()),
        (
            &panels.right,
            &time_axis,
            artifact.series.iter().map(|s| &s.training_time).collect::<Vec<_>>(),
        ),
    ];
    for (area, axis, per_series) in panel_values {
        let slot = area.height / n_rows as f64;
        let group = slot * config.bars.group_width.clamp(0.05, 1.0);
        let bar_h = group / n_ser as f64;
        let base_px = axis.data_to_pixel(bar_base(axis), area.left, area.right());

        canvas.push_clip(area.left, area.top, area.width, area.height);
        for (si, values) in per_series.iter().enumerate() {
            let color = series_color(&palette, si);
            let style = Style {
                fill: Some(color.with_alpha(0.85)),
                stroke: Some(color),
                stroke_width: 0.5,
                opacity: 1.0,
            };
            for (row, v) in values.iter().enumerate() {
                let Some(v) = *v else { continue };
                let row_top = area.bottom() - (row + 1) as f64 * slot;
                let y = row_top + (slot - group) / 2.0 + si as f64 * bar_h;
                let px =
                    axis.data_to_pixel(v, area.left, area.right()).clamp(area.left, area.right());
                canvas.rect(base_px.min(px), y, (px - base_px).abs(), bar_h, &style);
            }
        }
        canvas.pop_clip();
        draw_section_separators(&mut canvas, area, artifact, slot);
    }

    draw_section_titles(&mut canvas, &panels.left, artifact, config);

    let category_style = TextStyle {
        size: config.font.size,
        weight: FontWeight::Bold,
        anchor: TextAnchor::End,
        ..Default::default()
    };
    let (cx, cy) = (panels.left.left - 4.0, panels.left.top - 6.0);
    canvas.text(cx, cy, &artifact.category_label, &category_style);

    let entries: Vec<LegendEntry> = artifact
        .series
        .iter()
        .enumerate()
        .map(|(i, s)| LegendEntry {
            label: s.label.clone(),
            color: series_color(&palette, i),
            kind: LegendKind::FilledRect,
        })
        .collect();
    legend::draw_legend(
        &mut canvas,
        &panels.right,
        &Legend {
            header: Some(artifact.legend_header.as_str()),
            entries: &entries,
            font_size: config.font.size,
            position: LegendPosition::BottomRight,
            frame: true,
        },
    );

    Ok(canvas.finish_svg())
}

/// Dashed rules between sections.
fn draw_section_separators(
    canvas: &mut Canvas,
    area: &PlotArea,
    artifact: &SidewaysSummaryArtifact,
    slot: f64,
) {
    let style = LineStyle::dashed(Color::rgb(120, 120, 120), 0.6);
    let mut row = 0;
    for section in artifact.sections.iter().take(artifact.sections.len().saturating_sub(1)) {
        row += section.categories.len();
        let y = area.bottom() - row as f64 * slot;
        canvas.line(area.left, y, area.right(), y, &style);
    }
}

/// Section titles, rotated, left of the row labels.
fn draw_section_titles(
    canvas: &mut Canvas,
    area: &PlotArea,
    artifact: &SidewaysSummaryArtifact,
    config: &VizConfig,
) {
    let slot = area.height / artifact.n_rows() as f64;
    let x = 15.0 + config.font.label_size / 2.0;
    let style = TextStyle {
        size: config.font.label_size,
        weight: FontWeight::Bold,
        anchor: TextAnchor::Middle,
        baseline: TextBaseline::Central,
        ..Default::default()
    };
    let mut first_row = 0;
    for section in &artifact.sections {
        let n = section.categories.len();
        let mid = area.bottom() - (first_row as f64 + n as f64 / 2.0) * slot;
        canvas.text_rotated(x, mid, &section.title, &style, -90.0);
        first_row += n;
    }
}
