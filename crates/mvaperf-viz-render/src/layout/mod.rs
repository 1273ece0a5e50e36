pub mod axes;
pub mod legend;
pub mod margins;
pub mod multi_panel;
pub mod textbox;
