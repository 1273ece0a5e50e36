use mvaperf_viz::BarSummaryArtifact;

use crate::RenderError;
use crate::canvas::Canvas;
use crate::color::{Color, series_color};
use crate::config::VizConfig;
use crate::header::draw_header;
use crate::layout::axes::Axis;
use crate::layout::legend::{self, Legend, LegendEntry, LegendKind, LegendPosition};
use crate::layout::margins::PlotArea;
use crate::layout::textbox::draw_text_box;
use crate::plots::axes_draw::draw_axes;
use crate::primitives::*;

/// Value axis of a bar plot: the fixed range if given, else fitted to `values`.
pub(crate) fn value_axis(values: &[f64], range: Option<[f64; 2]>, log: bool) -> Axis {
    let positive = || values.iter().copied().filter(|v| *v > 0.0);
    match (range, log) {
        (Some([lo, hi]), false) => Axis::ranged_linear(lo, hi, 6),
        (Some([lo, hi]), true) => Axis::ranged_log(lo, hi),
        (None, false) => {
            let hi = values.iter().copied().fold(0.0_f64, f64::max);
            Axis::auto_linear(0.0, if hi > 0.0 { hi * 1.15 } else { 1.0 }, 6)
        }
        (None, true) => {
            let lo = positive().fold(f64::INFINITY, f64::min);
            let hi = positive().fold(0.0_f64, f64::max);
            if lo.is_finite() { Axis::auto_log(lo, hi) } else { Axis::auto_log(0.1, 10.0) }
        }
    }
}

/// Value where bars start: the axis floor, or zero when it lies inside a linear range.
pub(crate) fn bar_base(axis: &Axis) -> f64 {
    if axis.log { axis.min } else { 0.0_f64.clamp(axis.min, axis.max) }
}

/// `Summary_<name>`: grouped vertical bars, one group per category.
pub fn render(artifact: &BarSummaryArtifact, config: &VizConfig) -> crate::Result<String> {
    let n_cat = artifact.categories.len();
    let n_ser = artifact.series.len();
    if n_cat == 0 || n_ser == 0 {
        return Ok(super::empty_svg("No summary data"));
    }
    if let Some(s) = artifact.series.iter().find(|s| s.values.len() != n_cat) {
        return Err(RenderError::Layout(format!(
            "{}: series `{}` has {} values for {} categories",
            artifact.name,
            s.label,
            s.values.len(),
            n_cat
        )));
    }

    let mut canvas = Canvas::new(config.figure.width, config.figure.height, &config.font)?;

    let values: Vec<f64> =
        artifact.series.iter().flat_map(|s| s.values.iter().flatten()).copied().collect();
    let y_axis =
        value_axis(&values, artifact.y_range, artifact.log_y).with_label(&artifact.y_label);
    let x_axis = Axis::categories(&artifact.categories).with_label(&artifact.x_label);

    let area = PlotArea::auto(&canvas, &y_axis, &x_axis, config);
    draw_header(&mut canvas, &area, config);
    draw_axes(&mut canvas, &area, &x_axis, &y_axis, config);

    let palette = config.palette_colors();
    let slot = area.width / n_cat as f64;
    let group = slot * config.bars.group_width.clamp(0.05, 1.0);
    let bar_w = group / n_ser as f64;
    let base_py = y_axis.data_to_pixel(bar_base(&y_axis), area.bottom(), area.top);
    let value_style = TextStyle {
        size: config.font.tick_size * 0.8,
        color: Color::rgb(60, 60, 60),
        anchor: TextAnchor::Middle,
        ..Default::default()
    };

    canvas.push_clip(area.left, area.top, area.width, area.height);
    let mut entries = Vec::with_capacity(n_ser);
    for (si, s) in artifact.series.iter().enumerate() {
        let color = series_color(&palette, si);
        let style = Style {
            fill: Some(color.with_alpha(0.85)),
            stroke: Some(color),
            stroke_width: 0.6,
            opacity: 1.0,
        };
        for (ci, v) in s.values.iter().enumerate() {
            let Some(v) = *v else { continue };
            let x = area.left + ci as f64 * slot + (slot - group) / 2.0 + si as f64 * bar_w;
            let py =
                y_axis.data_to_pixel(v, area.bottom(), area.top).clamp(area.top, area.bottom());
            canvas.rect(x, py.min(base_py), bar_w, (base_py - py).abs(), &style);
            if config.bars.show_values {
                canvas.text(x + bar_w / 2.0, py - 3.0, &format_value(v), &value_style);
            }
        }
        entries.push(LegendEntry { label: s.label.clone(), color, kind: LegendKind::FilledRect });
    }
    canvas.pop_clip();

    draw_text_box(
        &mut canvas,
        &area,
        std::slice::from_ref(&artifact.title),
        config.font.size,
        LegendPosition::TopLeft,
        config.colors.text_box,
    );
    legend::draw_legend(
        &mut canvas,
        &area,
        &Legend {
            header: Some(artifact.legend_header.as_str()),
            entries: &entries,
            font_size: config.font.size,
            position: LegendPosition::TopRight,
            frame: true,
        },
    );

    Ok(canvas.finish_svg())
}

fn format_value(v: f64) -> String {
    if v.abs() >= 100.0 { format!("{v:.0}") } else { format!("{v:.3}") }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn fixed_linear_range_starts_bars_at_floor() {
        let ax = value_axis(&[0.7, 0.8], Some([0.5, 0.9]), false);
        assert_abs_diff_eq!(bar_base(&ax), 0.5);
    }

    #[test]
    fn fitted_log_axis_covers_values() {
        let ax = value_axis(&[3.0, 900.0, 90000.0], None, true);
        assert!(ax.log);
        assert!(ax.min <= 3.0 && ax.max >= 90000.0);
        assert_abs_diff_eq!(bar_base(&ax), ax.min);
    }

    #[test]
    fn value_labels() {
        assert_eq!(format_value(0.81234), "0.812");
        assert_eq!(format_value(1234.4), "1234");
    }
}
