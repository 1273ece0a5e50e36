use crate::canvas::Canvas;
use crate::color::Color;
use crate::layout::legend::LegendPosition;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

/// Borderless block of annotation lines (classifier, features, AUC) anchored
/// to a corner of the plot area.
pub fn draw_text_box(
    canvas: &mut Canvas,
    area: &PlotArea,
    lines: &[String],
    font_size: f64,
    position: LegendPosition,
    color: Color,
) {
    if lines.is_empty() {
        return;
    }
    let row_height = font_size + 4.0;
    let inset = 10.0;

    let (x, anchor) = match position {
        LegendPosition::TopLeft => (area.left + inset, TextAnchor::Start),
        LegendPosition::TopRight | LegendPosition::BottomRight => {
            (area.right() - inset, TextAnchor::End)
        }
    };
    let y0 = match position {
        LegendPosition::TopLeft | LegendPosition::TopRight => area.top + inset,
        LegendPosition::BottomRight => area.bottom() - inset - lines.len() as f64 * row_height,
    };

    let style = TextStyle {
        size: font_size,
        color,
        anchor,
        baseline: TextBaseline::Central,
        ..Default::default()
    };
    for (i, line) in lines.iter().enumerate() {
        canvas.text(x, y0 + (i as f64 + 0.5) * row_height, line, &style);
    }
}
