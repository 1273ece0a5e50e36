use crate::canvas::Canvas;
use crate::config::VizConfig;
use crate::header::header_height;
use crate::layout::axes::Axis;
use crate::primitives::TextStyle;

/// Rectangular plot area within the canvas.
#[derive(Debug, Clone, Copy)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Compute auto-margins from axis labels and config.
    pub fn auto(canvas: &Canvas, y_axis: &Axis, x_axis: &Axis, config: &VizConfig) -> Self {
        let left = y_axis_margin(canvas, y_axis, config);

        // Bottom margin: x-axis tick labels + axis label + padding
        let mut bottom = 15.0 + config.font.tick_size + 6.0;
        if !x_axis.label.is_empty() {
            bottom += config.font.label_size + 6.0;
        }

        let top = header_height(config);
        let right = 15.0;

        let width = canvas.width - left - right;
        let height = canvas.height - top - bottom;

        Self { left, top, width: width.max(50.0), height: height.max(50.0) }
    }

    /// Manual margins (for multi-panel layouts).
    pub fn manual(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }
}

/// Left margin for a y-axis: tick labels + rotated axis label + padding.
pub fn y_axis_margin(canvas: &Canvas, y_axis: &Axis, config: &VizConfig) -> f64 {
    let tick_style = TextStyle { size: config.font.tick_size, ..Default::default() };
    let max_tick_w = y_axis
        .tick_labels
        .iter()
        .map(|l| canvas.measure_text(l, &tick_style).width)
        .fold(0.0_f64, f64::max);
    let mut left = 15.0 + max_tick_w + 8.0;
    if !y_axis.label.is_empty() {
        left += config.font.label_size + 6.0;
    }
    left
}
