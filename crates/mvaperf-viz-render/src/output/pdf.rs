use crate::RenderError;
use crate::font::FontHandle;

/// Convert SVG string to PDF bytes.
pub fn svg_to_pdf(svg: &str, fonts: &FontHandle) -> crate::Result<Vec<u8>> {
    let opt = super::usvg_options(fonts);
    let tree = usvg::Tree::from_str(svg, &opt).map_err(|e| RenderError::Pdf(e.to_string()))?;

    svg2pdf::to_pdf(&tree, svg2pdf::ConversionOptions::default(), svg2pdf::PageOptions::default())
        .map_err(|e| RenderError::Pdf(e.to_string()))
}
