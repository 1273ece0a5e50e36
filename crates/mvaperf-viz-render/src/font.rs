use std::path::Path;

use ab_glyph::FontVec;
use base64::{Engine, engine::general_purpose::STANDARD};

use crate::RenderError;
use crate::config::FontConfig;
use crate::primitives::{FontStyle, FontWeight};

struct LoadedFont {
    font: FontVec,
    bytes: Vec<u8>,
}

impl LoadedFont {
    fn read(path: &Path) -> crate::Result<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| RenderError::Font(format!("{}: {e}", path.display())))?;
        let font = FontVec::try_from_vec(bytes.clone())
            .map_err(|e| RenderError::Font(format!("{}: {e}", path.display())))?;
        Ok(Self { font, bytes })
    }
}

/// Font faces configured for measuring and embedding. Every face is optional;
/// without one, text is measured with approximate metrics and left to the
/// viewer's `sans-serif`.
pub struct FontHandle {
    family: String,
    regular: Option<LoadedFont>,
    bold: Option<LoadedFont>,
    italic: Option<LoadedFont>,
}

impl FontHandle {
    pub fn none() -> Self {
        Self { family: String::new(), regular: None, bold: None, italic: None }
    }

    pub fn from_config(config: &FontConfig) -> crate::Result<Self> {
        let load = |p: &Option<std::path::PathBuf>| p.as_deref().map(LoadedFont::read).transpose();
        Ok(Self {
            family: config.family.clone(),
            regular: load(&config.regular)?,
            bold: load(&config.bold)?,
            italic: load(&config.italic)?,
        })
    }

    /// Face for a weight/style, falling back to the regular face.
    pub fn select(&self, weight: FontWeight, style: FontStyle) -> Option<&FontVec> {
        let face = match (weight, style) {
            (FontWeight::Bold, _) => self.bold.as_ref(),
            (_, FontStyle::Italic) => self.italic.as_ref(),
            _ => None,
        };
        face.or(self.regular.as_ref()).map(|f| &f.font)
    }

    /// Raw font files, for rasterisers that need their own font database.
    pub fn font_data(&self) -> impl Iterator<Item = &[u8]> {
        [&self.regular, &self.bold, &self.italic]
            .into_iter()
            .flatten()
            .map(|f| f.bytes.as_slice())
    }

    /// CSS `font-family` list used on `<text>` elements.
    pub fn css_family(&self) -> String {
        if self.family.is_empty() {
            "sans-serif".to_string()
        } else {
            format!("{}, sans-serif", self.family)
        }
    }

    /// SVG `<style>` block with an `@font-face` per loaded face. Empty when
    /// nothing was loaded.
    pub fn svg_font_style(&self) -> String {
        if self.family.is_empty() {
            return String::new();
        }
        let faces = [
            (&self.regular, 400, "normal"),
            (&self.bold, 700, "normal"),
            (&self.italic, 400, "italic"),
        ];
        let mut out = String::new();
        for (face, weight, style) in faces {
            let Some(f) = face else { continue };
            let b64 = STANDARD.encode(&f.bytes);
            out.push_str(&format!(
                "@font-face {{\n  font-family: '{family}';\n  font-weight: {weight};\n  font-style: {style};\n  src: url('data:font/ttf;base64,{b64}') format('truetype');\n}}\n",
                family = self.family,
            ));
        }
        if out.is_empty() { out } else { format!("<style>\n{out}</style>") }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_fonts_configured() {
        let fonts = FontHandle::from_config(&FontConfig::default()).unwrap();
        assert!(fonts.select(FontWeight::Bold, FontStyle::Normal).is_none());
        assert_eq!(fonts.font_data().count(), 0);
        assert_eq!(fonts.svg_font_style(), "");
        assert_eq!(fonts.css_family(), "sans-serif");
    }

    #[test]
    fn missing_font_file_is_an_error() {
        let cfg = FontConfig {
            family: "Inter".into(),
            regular: Some("/nonexistent/mvaperf/Inter-Regular.ttf".into()),
            ..FontConfig::default()
        };
        let err = FontHandle::from_config(&cfg).err().unwrap();
        assert!(matches!(err, RenderError::Font(_)));
    }
}
