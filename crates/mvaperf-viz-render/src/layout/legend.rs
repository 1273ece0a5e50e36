use crate::canvas::Canvas;
use crate::color::Color;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

pub struct LegendEntry {
    pub label: String,
    pub color: Color,
    pub kind: LegendKind,
}

pub enum LegendKind {
    FilledRect,
    Line(Option<String>), // dash pattern
    /// Line with a vertical error stroke, for histograms drawn with errors.
    LineError,
}

/// Corner of the plot area the legend box is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    TopLeft,
    TopRight,
    BottomRight,
}

pub struct Legend<'a> {
    pub header: Option<&'a str>,
    pub entries: &'a [LegendEntry],
    pub font_size: f64,
    pub position: LegendPosition,
    pub frame: bool,
}

/// Draw a legend in the plot area.
pub fn draw_legend(canvas: &mut Canvas, area: &PlotArea, legend: &Legend<'_>) {
    if legend.entries.is_empty() {
        return;
    }

    let font_size = legend.font_size;
    let row_height = font_size + 4.0;
    let swatch_w = 14.0;
    let swatch_h = font_size - 2.0;
    let gap = 6.0;
    let padding = 6.0;

    let text_style = TextStyle {
        size: font_size * 0.85,
        baseline: TextBaseline::Central,
        ..Default::default()
    };
    let header_style = TextStyle { weight: FontWeight::Bold, ..text_style.clone() };

    let entries_w = legend
        .entries
        .iter()
        .map(|e| swatch_w + gap + canvas.measure_text(&e.label, &text_style).width)
        .fold(0.0_f64, f64::max);
    let header_w =
        legend.header.map(|h| canvas.measure_text(h, &header_style).width).unwrap_or(0.0);
    let header_rows = usize::from(legend.header.is_some());

    let legend_w = padding + entries_w.max(header_w) + padding;
    let legend_h = padding + (legend.entries.len() + header_rows) as f64 * row_height + padding;

    let lx = match legend.position {
        LegendPosition::TopLeft => area.left + 5.0,
        LegendPosition::TopRight | LegendPosition::BottomRight => area.right() - legend_w - 5.0,
    };
    let ly = match legend.position {
        LegendPosition::TopLeft | LegendPosition::TopRight => area.top + 5.0,
        LegendPosition::BottomRight => area.bottom() - legend_h - 5.0,
    };

    let bg_style = Style {
        fill: Some(Color::rgba(255, 255, 255, 0.9)),
        stroke: if legend.frame { Some(Color::rgb(200, 200, 200)) } else { None },
        stroke_width: 0.5,
        opacity: 1.0,
    };
    canvas.rect(lx, ly, legend_w, legend_h, &bg_style);

    let sx = lx + padding;
    if let Some(header) = legend.header {
        canvas.text(sx, ly + padding + row_height / 2.0, header, &header_style);
    }

    for (i, entry) in legend.entries.iter().enumerate() {
        let ey = ly + padding + (i + header_rows) as f64 * row_height + row_height / 2.0;

        match entry.kind {
            LegendKind::FilledRect => {
                canvas.rect(
                    sx,
                    ey - swatch_h / 2.0,
                    swatch_w,
                    swatch_h,
                    &Style::filled(entry.color),
                );
            }
            LegendKind::Line(ref dash) => {
                let ls = LineStyle { color: entry.color, width: 1.5, dash: dash.clone() };
                canvas.line(sx, ey, sx + swatch_w, ey, &ls);
            }
            LegendKind::LineError => {
                let ls = LineStyle::solid(entry.color, 1.2);
                canvas.line(sx, ey, sx + swatch_w, ey, &ls);
                let mid = sx + swatch_w / 2.0;
                canvas.line(mid, ey - swatch_h / 2.0, mid, ey + swatch_h / 2.0, &ls);
            }
        }

        canvas.text(sx + swatch_w + gap, ey, &entry.label, &text_style);
    }
}
