use ab_glyph::{Font, FontVec, ScaleFont};

use crate::font::FontHandle;
use crate::primitives::TextStyle;

/// Average advance of a sans-serif glyph, as a fraction of the font size.
const APPROX_ADVANCE: f64 = 0.55;

#[derive(Debug, Clone, Copy)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub ascent: f64,
}

/// Measure text width and height in points. Uses the glyph advances of `font`
/// when one is loaded, approximate metrics otherwise.
pub fn measure_text(font: Option<&FontVec>, text: &str, size_pt: f64) -> TextMetrics {
    let Some(font) = font else {
        return TextMetrics {
            width: APPROX_ADVANCE * size_pt * text.chars().count() as f64,
            height: 1.2 * size_pt,
            ascent: 0.9 * size_pt,
        };
    };

    let scale = ab_glyph::PxScale::from(size_pt as f32);
    let scaled = font.as_scaled(scale);

    let mut width: f32 = 0.0;
    let mut prev_glyph_id = None;
    for ch in text.chars() {
        let glyph_id = font.glyph_id(ch);
        if let Some(prev) = prev_glyph_id {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev_glyph_id = Some(glyph_id);
    }

    let ascent = scaled.ascent();
    let descent = scaled.descent();

    TextMetrics { width: width as f64, height: (ascent - descent) as f64, ascent: ascent as f64 }
}

/// Measure text with a TextStyle, selecting the correct font face.
pub fn measure_styled(fonts: &FontHandle, text: &str, style: &TextStyle) -> TextMetrics {
    measure_text(fonts.select(style.weight, style.style), text, style.size)
}
