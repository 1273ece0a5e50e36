use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::VizConfig;
use crate::layout::axes::Axis;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

/// Draw a standard box frame with axes, ticks, grid, and labels.
pub fn draw_axes(
    canvas: &mut Canvas,
    area: &PlotArea,
    x_axis: &Axis,
    y_axis: &Axis,
    config: &VizConfig,
) {
    let frame_color = Color::rgb(0, 0, 0);
    let tick_style_line = LineStyle::solid(frame_color, 0.6);
    let minor_tick_style = LineStyle::solid(frame_color, 0.4);
    let grid_style = LineStyle {
        color: config.grid.color.with_alpha(config.grid.alpha),
        width: 0.5,
        dash: Some("3 3".into()),
    };

    let inward = config.axes.tick_direction == "in";
    let tl = config.axes.tick_length;
    let mtl = config.axes.minor_tick_length;
    // Signed tick offsets pointing into (in) or out of (out) the frame.
    let (t_in, m_in) = if inward { (tl, mtl) } else { (-tl, -mtl) };
    let outward = if inward { 0.0 } else { tl };

    draw_frame(canvas, area);

    let tick_label_style = TextStyle {
        size: config.font.tick_size,
        color: frame_color,
        anchor: TextAnchor::Middle,
        baseline: TextBaseline::Hanging,
        ..Default::default()
    };

    // --- X axis ticks ---
    for (i, &val) in x_axis.tick_positions.iter().enumerate() {
        let px = x_axis.data_to_pixel(val, area.left, area.right());
        if px < area.left - 0.5 || px > area.right() + 0.5 {
            continue;
        }

        if config.grid.show && x_axis.grid {
            canvas.line(px, area.top, px, area.bottom(), &grid_style);
        }

        canvas.line(px, area.bottom(), px, area.bottom() - t_in, &tick_style_line);
        if config.axes.show_top_ticks {
            canvas.line(px, area.top, px, area.top + t_in, &tick_style_line);
        }

        if let Some(label) = x_axis.tick_labels.get(i) {
            canvas.text(px, area.bottom() + outward + 3.0, label, &tick_label_style);
        }
    }

    for &val in &x_axis.minor_ticks {
        let px = x_axis.data_to_pixel(val, area.left, area.right());
        if px < area.left - 0.5 || px > area.right() + 0.5 {
            continue;
        }
        canvas.line(px, area.bottom(), px, area.bottom() - m_in, &minor_tick_style);
    }

    // --- Y axis ticks ---
    let y_tick_label_style = TextStyle {
        size: config.font.tick_size,
        color: frame_color,
        anchor: TextAnchor::End,
        baseline: TextBaseline::Central,
        ..Default::default()
    };

    let mut max_label_w: f64 = 0.0;
    for (i, &val) in y_axis.tick_positions.iter().enumerate() {
        let py = y_axis.data_to_pixel(val, area.bottom(), area.top);
        if py < area.top - 0.5 || py > area.bottom() + 0.5 {
            continue;
        }

        if config.grid.show && y_axis.grid {
            canvas.line(area.left, py, area.right(), py, &grid_style);
        }

        canvas.line(area.left, py, area.left + t_in, py, &tick_style_line);
        if config.axes.show_right_ticks {
            canvas.line(area.right(), py, area.right() - t_in, py, &tick_style_line);
        }

        if let Some(label) = y_axis.tick_labels.get(i) {
            canvas.text(area.left - outward - 4.0, py, label, &y_tick_label_style);
            max_label_w = max_label_w.max(canvas.measure_text(label, &y_tick_label_style).width);
        }
    }

    for &val in &y_axis.minor_ticks {
        let py = y_axis.data_to_pixel(val, area.bottom(), area.top);
        if py < area.top - 0.5 || py > area.bottom() + 0.5 {
            continue;
        }
        canvas.line(area.left, py, area.left + m_in, py, &minor_tick_style);
    }

    // --- Axis labels ---
    let label_style = TextStyle {
        size: config.font.label_size,
        color: frame_color,
        anchor: TextAnchor::Middle,
        ..Default::default()
    };

    if !x_axis.label.is_empty() {
        let label_y = area.bottom() + outward + config.font.tick_size + 14.0;
        canvas.text(area.left + area.width / 2.0, label_y, &x_axis.label, &label_style);
    }

    if !y_axis.label.is_empty() {
        let label_x = area.left - outward - max_label_w - 12.0;
        let label_y = area.top + area.height / 2.0;
        canvas.text_rotated(label_x, label_y, &y_axis.label, &label_style, -90.0);
    }
}

/// Draw axes frame only (no ticks).
pub fn draw_frame(canvas: &mut Canvas, area: &PlotArea) {
    let style = LineStyle::solid(Color::rgb(0, 0, 0), 0.8);
    canvas.line(area.left, area.top, area.right(), area.top, &style);
    canvas.line(area.left, area.bottom(), area.right(), area.bottom(), &style);
    canvas.line(area.left, area.top, area.left, area.bottom(), &style);
    canvas.line(area.right(), area.top, area.right(), area.bottom(), &style);
}
