use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::VizConfig;
use crate::layout::margins::PlotArea;
use crate::primitives::*;

/// Draw the header label above the frame (e.g. **mvaperf** *Simulation*).
pub fn draw_header(canvas: &mut Canvas, area: &PlotArea, config: &VizConfig) {
    let header = &config.header;
    let y = area.top - 6.0;

    if !header.label.is_empty() {
        let header_size = config.font.label_size * 1.3;
        let x = area.left + area.width * 0.02;

        let bold_style = TextStyle {
            size: header_size,
            color: Color::rgb(0, 0, 0),
            weight: FontWeight::Bold,
            ..Default::default()
        };
        canvas.text(x, y, &header.label, &bold_style);

        let name_w = canvas.measure_text(&header.label, &bold_style).width;

        if !header.status.is_empty() {
            let italic_style = TextStyle {
                size: header_size * 0.85,
                color: Color::rgb(0, 0, 0),
                style: FontStyle::Italic,
                ..Default::default()
            };
            canvas.text(x + name_w + 5.0, y, &header.status, &italic_style);
        }
    }

    if !header.info.is_empty() {
        let info_style = TextStyle {
            size: config.font.tick_size,
            color: Color::rgb(80, 80, 80),
            anchor: TextAnchor::End,
            ..Default::default()
        };
        canvas.text(area.right(), y, &header.info, &info_style);
    }
}

/// Reserved space above the frame for [`draw_header`].
pub fn header_height(config: &VizConfig) -> f64 {
    if config.header.label.is_empty() && config.header.info.is_empty() {
        12.0
    } else {
        config.font.label_size * 1.3 + 20.0
    }
}
