use mvaperf_viz::{RocArtifact, RocOverlayArtifact};

use crate::canvas::Canvas;
use crate::color::series_color;
use crate::config::VizConfig;
use crate::header::draw_header;
use crate::layout::axes::Axis;
use crate::layout::legend::{self, Legend, LegendEntry, LegendKind, LegendPosition};
use crate::layout::margins::PlotArea;
use crate::layout::textbox::draw_text_box;
use crate::plots::axes_draw::draw_axes;
use crate::primitives::*;

/// Unit square with efficiency axes, header and the random-guess diagonal.
struct RocFrame {
    canvas: Canvas,
    area: PlotArea,
    axis: Axis,
}

impl RocFrame {
    fn new(config: &VizConfig) -> crate::Result<Self> {
        let mut canvas = Canvas::new(config.figure.width, config.figure.height, &config.font)?;
        let x_axis = Axis::ranged_linear(0.0, 1.0, 6).with_label(&config.roc.x_label);
        let y_axis = Axis::ranged_linear(0.0, 1.0, 6).with_label(&config.roc.y_label);

        let area = PlotArea::auto(&canvas, &y_axis, &x_axis, config);
        draw_header(&mut canvas, &area, config);
        draw_axes(&mut canvas, &area, &x_axis, &y_axis, config);

        let frame = Self { canvas, area, axis: x_axis };
        Ok(frame.with_diagonal(config))
    }

    fn with_diagonal(mut self, config: &VizConfig) -> Self {
        if config.roc.show_diagonal {
            let (x0, y0) = self.point(0.0, 0.0);
            let (x1, y1) = self.point(1.0, 1.0);
            let style = LineStyle::dashed(config.colors.diagonal, 1.0);
            self.canvas.line(x0, y0, x1, y1, &style);
        }
        self
    }

    fn point(&self, bkg_eff: f64, sig_eff: f64) -> (f64, f64) {
        (
            self.axis.data_to_pixel(bkg_eff, self.area.left, self.area.right()),
            self.axis.data_to_pixel(sig_eff, self.area.bottom(), self.area.top),
        )
    }

    fn curve(&mut self, bkg_eff: &[f64], sig_eff: &[f64], style: &LineStyle) {
        let points: Vec<(f64, f64)> =
            bkg_eff.iter().zip(sig_eff).map(|(&b, &s)| self.point(b, s)).collect();
        let a = self.area;
        self.canvas.push_clip(a.left, a.top, a.width, a.height);
        self.canvas.polyline(&points, style);
        self.canvas.pop_clip();
    }
}

/// `<config>_ROC`: one curve with its AUC.
pub fn render(artifact: &RocArtifact, config: &VizConfig) -> crate::Result<String> {
    let mut frame = RocFrame::new(config)?;
    let style = LineStyle::solid(config.colors.roc, config.roc.line_width);
    frame.curve(&artifact.bkg_eff, &artifact.sig_eff, &style);

    let area = frame.area;
    draw_text_box(
        &mut frame.canvas,
        &area,
        &[format!("AUC = {:.3}", artifact.auc)],
        config.font.size,
        LegendPosition::TopLeft,
        config.colors.text_box,
    );

    let mut lines = vec![artifact.classifier_title.clone(), artifact.features_title.clone()];
    if let Some(events) = &artifact.training_events {
        lines.push(format!("{events} Training Events"));
    }
    draw_text_box(
        &mut frame.canvas,
        &area,
        &lines,
        config.font.size,
        LegendPosition::BottomRight,
        config.colors.text_box,
    );

    Ok(frame.canvas.finish_svg())
}

/// `OverlayROC_<name>`: several curves, legend in the lower right.
pub fn render_overlay(artifact: &RocOverlayArtifact, config: &VizConfig) -> crate::Result<String> {
    if artifact.series.is_empty() {
        return Ok(super::empty_svg("No ROC curves selected"));
    }
    let mut frame = RocFrame::new(config)?;
    let palette = config.palette_colors();

    let mut entries = Vec::with_capacity(artifact.series.len());
    for (i, s) in artifact.series.iter().enumerate() {
        let color = series_color(&palette, i);
        frame.curve(&s.bkg_eff, &s.sig_eff, &LineStyle::solid(color, config.roc.line_width));
        entries.push(LegendEntry { label: s.label.clone(), color, kind: LegendKind::Line(None) });
    }

    let area = frame.area;
    legend::draw_legend(
        &mut frame.canvas,
        &area,
        &Legend {
            header: artifact.header.as_deref(),
            entries: &entries,
            font_size: config.font.size,
            position: LegendPosition::BottomRight,
            frame: true,
        },
    );

    Ok(frame.canvas.finish_svg())
}
