use crate::color::Color;
use crate::config::*;

/// Built-in theme presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuiltinTheme {
    #[default]
    Mvaperf,
    /// Classic ROOT canvas look: white frame, no grid, saturated primaries.
    Root,
    Minimal,
}

impl BuiltinTheme {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "root" => Self::Root,
            "minimal" => Self::Minimal,
            _ => Self::Mvaperf,
        }
    }

    pub fn base_config(self) -> VizConfig {
        match self {
            Self::Mvaperf => mvaperf(),
            Self::Root => root(),
            Self::Minimal => minimal(),
        }
    }
}

fn mvaperf() -> VizConfig {
    VizConfig {
        theme: "mvaperf".into(),
        figure: FigureConfig::default(),
        font: FontConfig::default(),
        axes: AxesConfig::default(),
        grid: GridConfig::default(),
        header: HeaderConfig {
            label: "mvaperf".into(),
            status: "Simulation".into(),
            info: String::new(),
        },
        colors: ColorsConfig::default(),
        palette: "hep2026".into(),
        output: OutputConfig::default(),
        response: ResponseConfig::default(),
        roc: RocConfig::default(),
        bars: BarsConfig::default(),
    }
}

fn root() -> VizConfig {
    VizConfig {
        theme: "root".into(),
        figure: FigureConfig { width: 504.0, height: 360.0 },
        font: FontConfig { size: 11.0, label_size: 12.0, tick_size: 10.0, ..FontConfig::default() },
        axes: AxesConfig {
            tick_direction: "in".into(),
            show_top_ticks: false,
            show_right_ticks: false,
            tick_length: 8.0,
            minor_tick_length: 4.0,
        },
        grid: GridConfig { show: false, ..GridConfig::default() },
        header: HeaderConfig::default(),
        colors: ColorsConfig {
            signal: Color::hex("#0000ff"),
            background: Color::hex("#ff0000"),
            roc: Color::hex("#0000ff"),
            diagonal: Color::hex("#000000"),
            text_box: Color::hex("#000000"),
        },
        palette: "root_classic".into(),
        ..mvaperf()
    }
}

fn minimal() -> VizConfig {
    VizConfig {
        theme: "minimal".into(),
        font: FontConfig { size: 9.0, label_size: 10.0, tick_size: 8.0, ..FontConfig::default() },
        axes: AxesConfig {
            tick_direction: "out".into(),
            show_top_ticks: false,
            show_right_ticks: false,
            tick_length: 4.0,
            minor_tick_length: 2.0,
        },
        grid: GridConfig { show: false, ..GridConfig::default() },
        header: HeaderConfig::default(),
        palette: "tableau10".into(),
        ..mvaperf()
    }
}
