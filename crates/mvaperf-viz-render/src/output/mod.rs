#[cfg(feature = "pdf")]
pub mod pdf;
#[cfg(feature = "png")]
pub mod png;
pub mod svg;

/// Parse options with a font database holding the configured faces, then the
/// system fonts as fallback.
#[cfg(any(feature = "png", feature = "pdf"))]
pub(crate) fn usvg_options(fonts: &crate::font::FontHandle) -> usvg::Options<'static> {
    let mut opt = usvg::Options::default();
    let fontdb = opt.fontdb_mut();
    for data in fonts.font_data() {
        fontdb.load_font_data(data.to_vec());
    }
    fontdb.load_system_fonts();
    opt
}
