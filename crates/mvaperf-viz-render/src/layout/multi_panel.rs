use crate::layout::margins::PlotArea;

/// Side-by-side panels sharing a row axis (e.g. sideways summary: AUC panel +
/// training-time panel). Left panel gets `left_frac` of width, right panel the rest.
#[derive(Debug, Clone)]
pub struct DualPanelLayout {
    pub left: PlotArea,
    pub right: PlotArea,
}

impl DualPanelLayout {
    pub fn new(x: f64, top: f64, total_width: f64, height: f64, gap: f64, left_frac: f64) -> Self {
        let left_w = total_width * left_frac;
        let right_w = total_width - left_w - gap;

        Self {
            left: PlotArea::manual(x, top, left_w, height),
            right: PlotArea::manual(x + left_w + gap, top, right_w, height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn panels_split_width() {
        let l = DualPanelLayout::new(100.0, 20.0, 400.0, 300.0, 10.0, 0.5);
        assert_abs_diff_eq!(l.left.width, 200.0);
        assert_abs_diff_eq!(l.right.left, 310.0);
        assert_abs_diff_eq!(l.right.right(), 500.0);
        assert_abs_diff_eq!(l.right.height, l.left.height);
    }
}
