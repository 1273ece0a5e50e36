/// Axis configuration with tick generation and data→pixel mapping.
#[derive(Debug, Clone)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub log: bool,
    /// Draw grid lines at the major ticks (when the theme enables a grid)
    pub grid: bool,
    pub label: String,
    pub tick_positions: Vec<f64>,
    pub tick_labels: Vec<String>,
    pub minor_ticks: Vec<f64>,
}

impl Axis {
    /// Auto-scale linear axis with "nice number" ticks.
    pub fn auto_linear(data_min: f64, data_max: f64, target_ticks: usize) -> Self {
        let (nice_min, nice_max, step) = nice_range(data_min, data_max, target_ticks);
        Self::linear_ticks(nice_min, nice_max, step)
    }

    /// Linear axis over exactly `[min, max]` with nice ticks inside it.
    pub fn ranged_linear(min: f64, max: f64, target_ticks: usize) -> Self {
        if min.is_nan() || max.is_nan() || max <= min {
            return Self::auto_linear(min, max, target_ticks);
        }
        let step = nice_step((max - min) / (target_ticks.max(2) - 1) as f64);
        let first = (min / step - 1e-9).ceil() * step;
        let mut axis = Self::linear_ticks(first, max, step);
        axis.min = min;
        axis.max = max;
        let minor_step = step / 5.0;
        let mut mv = first - minor_step;
        while mv >= min - minor_step * 0.01 {
            axis.minor_ticks.push(mv);
            mv -= minor_step;
        }
        axis
    }

    fn linear_ticks(start: f64, end: f64, step: f64) -> Self {
        let mut ticks = Vec::new();
        let mut labels = Vec::new();
        let mut i = 0_u32;
        loop {
            let v = start + f64::from(i) * step;
            if v > end + step * 0.01 {
                break;
            }
            ticks.push(v);
            labels.push(format_tick(v, step));
            i += 1;
        }

        // Minor ticks: 5 subdivisions per major
        let minor_step = step / 5.0;
        let mut minor = Vec::new();
        let mut j = 0_u32;
        loop {
            let mv = start + f64::from(j) * minor_step;
            if mv > end + minor_step * 0.01 {
                break;
            }
            if j % 5 != 0 {
                minor.push(mv);
            }
            j += 1;
        }

        Self {
            min: start,
            max: end,
            log: false,
            grid: true,
            label: String::new(),
            tick_positions: ticks,
            tick_labels: labels,
            minor_ticks: minor,
        }
    }

    /// Auto-scale logarithmic axis.
    pub fn auto_log(data_min: f64, data_max: f64) -> Self {
        let log_min = data_min.max(1e-20).log10().floor() as i32;
        let log_max = data_max.max(1e-20).log10().ceil().max(f64::from(log_min) + 1.0) as i32;
        Self::log_decades(log_min, log_max, 10.0_f64.powi(log_min), 10.0_f64.powi(log_max))
    }

    /// Logarithmic axis over exactly `[min, max]`; both must be positive.
    pub fn ranged_log(min: f64, max: f64) -> Self {
        let log_min = min.max(1e-20).log10().floor() as i32;
        let log_max = max.max(1e-20).log10().ceil() as i32;
        let mut axis = Self::log_decades(log_min, log_max, min, max);
        let inside = |v: &f64| *v >= min * (1.0 - 1e-9) && *v <= max * (1.0 + 1e-9);
        let (ticks, labels) = axis
            .tick_positions
            .iter()
            .zip(&axis.tick_labels)
            .filter(|(v, _)| inside(*v))
            .map(|(v, l)| (*v, l.clone()))
            .unzip();
        axis.tick_positions = ticks;
        axis.tick_labels = labels;
        axis.minor_ticks.retain(inside);
        axis
    }

    fn log_decades(log_min: i32, log_max: i32, min: f64, max: f64) -> Self {
        let mut ticks = Vec::new();
        let mut labels = Vec::new();
        let mut minor = Vec::new();

        for exp in log_min..=log_max {
            let v = 10.0_f64.powi(exp);
            ticks.push(v);
            labels.push(format!("10{}", superscript(exp)));
            if exp < log_max {
                for m in 2..=9 {
                    minor.push(f64::from(m) * v);
                }
            }
        }

        Self {
            min,
            max,
            log: true,
            grid: true,
            label: String::new(),
            tick_positions: ticks,
            tick_labels: labels,
            minor_ticks: minor,
        }
    }

    /// Category axis: one unit slot per label, ticks at slot centres.
    pub fn categories(labels: &[String]) -> Self {
        Self {
            min: 0.0,
            max: labels.len().max(1) as f64,
            log: false,
            grid: false,
            label: String::new(),
            tick_positions: (0..labels.len()).map(|i| i as f64 + 0.5).collect(),
            tick_labels: labels.to_vec(),
            minor_ticks: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Keep the ticks, drop their labels (panels sharing an axis with a neighbour).
    pub fn without_tick_labels(mut self) -> Self {
        self.tick_labels.clear();
        self
    }

    /// Map a data value to pixel coordinate.
    pub fn data_to_pixel(&self, value: f64, px_min: f64, px_max: f64) -> f64 {
        let frac = if self.log {
            let log_val = value.max(1e-20).ln();
            let log_min = self.min.max(1e-20).ln();
            let log_max = self.max.max(1e-20).ln();
            (log_val - log_min) / (log_max - log_min)
        } else {
            (value - self.min) / (self.max - self.min)
        };
        px_min + frac * (px_max - px_min)
    }
}

/// "Nice numbers" algorithm for pleasant tick spacing.
fn nice_range(data_min: f64, data_max: f64, target_ticks: usize) -> (f64, f64, f64) {
    if (data_max - data_min).abs() < 1e-15 {
        return (data_min - 1.0, data_max + 1.0, 1.0);
    }
    let range = data_max - data_min;
    let rough_step = range / (target_ticks.max(2) - 1) as f64;
    let step = nice_step(rough_step);
    let nice_min = (data_min / step).floor() * step;
    let nice_max = (data_max / step).ceil() * step;
    (nice_min, nice_max, step)
}

fn nice_step(rough: f64) -> f64 {
    let exp = rough.abs().log10().floor();
    let frac = rough / 10.0_f64.powf(exp);
    let nice_frac = if frac <= 1.5 {
        1.0
    } else if frac <= 3.5 {
        2.0
    } else if frac <= 7.5 {
        5.0
    } else {
        10.0
    };
    nice_frac * 10.0_f64.powf(exp)
}

fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step >= 1.0 { 0 } else { (-step.log10().floor()) as usize };
    // Avoid "-0"
    let v = if value.abs() < step * 0.01 { 0.0 } else { value };
    if decimals == 0 {
        format!("{}", v.round() as i64)
    } else {
        format!("{:.prec$}", v, prec = decimals)
    }
}

fn superscript(n: i32) -> String {
    n.to_string()
        .chars()
        .map(|c| match c {
            '-' => '\u{207B}',
            '0' => '\u{2070}',
            '1' => '\u{00B9}',
            '2' => '\u{00B2}',
            '3' => '\u{00B3}',
            '4' => '\u{2074}',
            '5' => '\u{2075}',
            '6' => '\u{2076}',
            '7' => '\u{2077}',
            '8' => '\u{2078}',
            '9' => '\u{2079}',
            _ => c,
        })
        .collect()
}
