use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::color::Color;
use crate::theme::BuiltinTheme;

/// Top-level visualization configuration (YAML or programmatic).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VizConfig {
    pub theme: String,
    pub figure: FigureConfig,
    pub font: FontConfig,
    pub axes: AxesConfig,
    pub grid: GridConfig,
    pub header: HeaderConfig,
    pub colors: ColorsConfig,
    pub palette: String,
    pub output: OutputConfig,
    pub response: ResponseConfig,
    pub roc: RocConfig,
    pub bars: BarsConfig,
}

impl Default for VizConfig {
    fn default() -> Self {
        BuiltinTheme::default().base_config()
    }
}

impl VizConfig {
    pub fn palette_colors(&self) -> Vec<Color> {
        crate::color::palette_colors(&self.palette)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub width: f64,
    pub height: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 432.0,  // 6" * 72
            height: 432.0, // square, like the classic ROC canvas
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub size: f64,
    pub label_size: f64,
    pub tick_size: f64,
    /// CSS family name the loaded faces are registered under
    pub family: String,
    pub regular: Option<PathBuf>,
    pub bold: Option<PathBuf>,
    pub italic: Option<PathBuf>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            size: 10.0,
            label_size: 11.0,
            tick_size: 8.5,
            family: String::new(),
            regular: None,
            bold: None,
            italic: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesConfig {
    pub tick_direction: String,
    pub show_top_ticks: bool,
    pub show_right_ticks: bool,
    pub tick_length: f64,
    pub minor_tick_length: f64,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            tick_direction: "in".into(),
            show_top_ticks: true,
            show_right_ticks: true,
            tick_length: 5.0,
            minor_tick_length: 3.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub show: bool,
    pub color: Color,
    pub alpha: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { show: true, color: Color::hex("#CBD5E1"), alpha: 0.55 }
    }
}

/// Label drawn above the plot frame: bold `label`, italic `status`,
/// right-aligned `info`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    pub label: String,
    pub status: String,
    pub info: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub signal: Color,
    pub background: Color,
    pub roc: Color,
    pub diagonal: Color,
    pub text_box: Color,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            signal: Color::hex("#1D4ED8"),
            background: Color::hex("#DC2626"),
            roc: Color::hex("#111827"),
            diagonal: Color::hex("#6B7280"),
            text_box: Color::hex("#374151"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dpi: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { dpi: 220 }
    }
}

/// Response-distribution overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseConfig {
    /// Y maximum as a multiple of the tallest bin
    pub y_headroom: f64,
    pub show_errors: bool,
    pub legend_header: String,
    pub signal_label: String,
    pub background_label: String,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            y_headroom: 1.25,
            show_errors: true,
            legend_header: "Test Data".into(),
            signal_label: "Signal".into(),
            background_label: "Background".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RocConfig {
    pub x_label: String,
    pub y_label: String,
    pub show_diagonal: bool,
    pub line_width: f64,
}

impl Default for RocConfig {
    fn default() -> Self {
        Self {
            x_label: "Background Eff.".into(),
            y_label: "Signal Eff.".into(),
            show_diagonal: true,
            line_width: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BarsConfig {
    /// Fraction of a category slot covered by its bar group
    pub group_width: f64,
    /// Print the value next to each bar
    pub show_values: bool,
}

impl Default for BarsConfig {
    fn default() -> Self {
        Self { group_width: 0.8, show_values: false }
    }
}

/// Resolve a VizConfig from optional YAML string.
/// Priority: user YAML overrides → theme base config (selected by `theme:`).
pub fn resolve_config(user_yaml: Option<&str>) -> crate::Result<VizConfig> {
    let Some(yaml) = user_yaml else {
        return Ok(VizConfig::default());
    };
    let cfg_err = |e: serde_yaml_ng::Error| crate::RenderError::Config(e.to_string());

    let user: serde_yaml_ng::Value = serde_yaml_ng::from_str(yaml).map_err(cfg_err)?;
    if user.is_null() {
        return Ok(VizConfig::default());
    }
    let theme = user
        .get("theme")
        .and_then(|t| t.as_str())
        .map(BuiltinTheme::parse)
        .unwrap_or_default();

    let mut merged = serde_yaml_ng::to_value(theme.base_config()).map_err(cfg_err)?;
    merge(&mut merged, user);
    serde_yaml_ng::from_value(merged).map_err(cfg_err)
}

fn merge(base: &mut serde_yaml_ng::Value, over: serde_yaml_ng::Value) {
    use serde_yaml_ng::Value;
    match (base, over) {
        (Value::Mapping(b), Value::Mapping(o)) => {
            for (k, v) in o {
                match b.get_mut(&k) {
                    Some(slot) => merge(slot, v),
                    None => {
                        b.insert(k, v);
                    }
                }
            }
        }
        (slot, v) => *slot = v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_is_default() {
        let cfg = resolve_config(None).unwrap();
        assert_eq!(cfg.theme, "mvaperf");
        let cfg = resolve_config(Some("")).unwrap();
        assert_eq!(cfg.theme, "mvaperf");
    }

    #[test]
    fn user_values_override_theme() {
        let yaml = "theme: root\nresponse:\n  signal_label: \"ttH Signal\"\nfigure:\n  width: 600\n";
        let cfg = resolve_config(Some(yaml)).unwrap();
        assert_eq!(cfg.theme, "root");
        assert_eq!(cfg.response.signal_label, "ttH Signal");
        assert_eq!(cfg.response.legend_header, "Test Data");
        assert!((cfg.figure.width - 600.0).abs() < 1e-9);
        // untouched field keeps the root theme's value
        assert!(!cfg.grid.show);
    }

    #[test]
    fn bad_color_is_a_config_error() {
        let err = resolve_config(Some("colors:\n  signal: blue\n")).unwrap_err();
        assert!(matches!(err, crate::RenderError::Config(_)));
    }
}
