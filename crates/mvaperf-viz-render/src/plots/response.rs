use mvaperf_viz::ResponseArtifact;

use crate::RenderError;
use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::VizConfig;
use crate::header::draw_header;
use crate::layout::axes::Axis;
use crate::layout::legend::{self, Legend, LegendEntry, LegendKind, LegendPosition};
use crate::layout::margins::PlotArea;
use crate::layout::textbox::draw_text_box;
use crate::plots::axes_draw::draw_axes;
use crate::primitives::*;

pub fn render(artifact: &ResponseArtifact, config: &VizConfig) -> crate::Result<String> {
    let n = artifact.signal_y.len();
    if n == 0 {
        return Ok(super::empty_svg("No response data"));
    }
    let lengths =
        [artifact.signal_yerr.len(), artifact.background_y.len(), artifact.background_yerr.len()];
    if artifact.bin_edges.len() != n + 1 || lengths.iter().any(|&l| l != n) {
        return Err(RenderError::Layout(format!(
            "{}: response arrays disagree with {} bin edges",
            artifact.config_name,
            artifact.bin_edges.len()
        )));
    }

    let cfg = &config.response;
    let mut canvas = Canvas::new(config.figure.width, config.figure.height, &config.font)?;

    let tallest = |y: &[f64], err: &[f64]| {
        y.iter()
            .zip(err)
            .map(|(v, e)| if cfg.show_errors { v + e } else { *v })
            .fold(0.0_f64, f64::max)
    };
    let y_peak = tallest(&artifact.signal_y, &artifact.signal_yerr)
        .max(tallest(&artifact.background_y, &artifact.background_yerr));
    let y_max = if y_peak > 0.0 { y_peak * cfg.y_headroom } else { 1.0 };

    let x_axis = Axis::ranged_linear(artifact.bin_edges[0], artifact.bin_edges[n], 6)
        .with_label(&artifact.x_label);
    let y_axis = Axis::ranged_linear(0.0, y_max, 6).with_label(&artifact.y_label);

    let area = PlotArea::auto(&canvas, &y_axis, &x_axis, config);
    draw_header(&mut canvas, &area, config);
    draw_axes(&mut canvas, &area, &x_axis, &y_axis, config);

    let px_edges: Vec<f64> = artifact
        .bin_edges
        .iter()
        .map(|&e| x_axis.data_to_pixel(e, area.left, area.right()))
        .collect();
    let to_py = |v: f64| y_axis.data_to_pixel(v, area.bottom(), area.top);

    canvas.push_clip(area.left, area.top, area.width, area.height);
    // Background first, signal drawn over it.
    for (y, err, color) in [
        (&artifact.background_y, &artifact.background_yerr, config.colors.background),
        (&artifact.signal_y, &artifact.signal_yerr, config.colors.signal),
    ] {
        draw_histogram(&mut canvas, &px_edges, y, err, color, cfg.show_errors, &to_py);
    }
    canvas.pop_clip();

    let entries = [
        LegendEntry {
            label: cfg.signal_label.clone(),
            color: config.colors.signal,
            kind: LegendKind::LineError,
        },
        LegendEntry {
            label: cfg.background_label.clone(),
            color: config.colors.background,
            kind: LegendKind::LineError,
        },
    ];
    legend::draw_legend(
        &mut canvas,
        &area,
        &Legend {
            header: Some(cfg.legend_header.as_str()).filter(|h| !h.is_empty()),
            entries: &entries,
            font_size: config.font.size,
            position: LegendPosition::TopLeft,
            frame: false,
        },
    );

    let mut lines = vec![artifact.classifier_title.clone(), artifact.features_title.clone()];
    if let Some(events) = &artifact.training_events {
        lines.push(format!("{events} Training Events"));
    }
    lines.push(format!("AUC = {:.3}", artifact.auc));
    draw_text_box(
        &mut canvas,
        &area,
        &lines,
        config.font.size * 0.85,
        LegendPosition::TopRight,
        config.colors.text_box,
    );

    Ok(canvas.finish_svg())
}

fn draw_histogram(
    canvas: &mut Canvas,
    px_edges: &[f64],
    y: &[f64],
    err: &[f64],
    color: Color,
    show_errors: bool,
    to_py: &dyn Fn(f64) -> f64,
) {
    let heights: Vec<f64> = y.iter().map(|&v| to_py(v)).collect();
    let line = LineStyle::solid(color, 1.2);
    canvas.step_outline(px_edges, &heights, to_py(0.0), &line);

    if show_errors {
        let err_style = LineStyle::solid(color, 0.8);
        for (i, (&v, &e)) in y.iter().zip(err).enumerate() {
            if e <= 0.0 {
                continue;
            }
            let cx = 0.5 * (px_edges[i] + px_edges[i + 1]);
            canvas.error_bar(cx, to_py(v - e), to_py(v + e), 0.0, &err_style);
        }
    }
}
