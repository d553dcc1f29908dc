/// A position along an axis where a grid line and tick label is placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// The value at this tick in data coordinates.
    pub value: f64,

    /// The step size between ticks.
    pub step_size: f64,
}

impl Tick {
    /// Create a new tick.
    pub fn new(value: f64, step_size: f64) -> Self {
        Self { value, step_size }
    }

    /// True for the tick sitting on the origin.
    pub fn is_zero(&self) -> bool {
        self.value == 0.0
    }
}

/// Tick label text. The origin gets no tick label; the plot marks it once with "0".
pub fn tick_label(tick: Tick) -> Option<String> {
    if tick.is_zero() {
        return None;
    }
    let log_step = tick.step_size.log10();
    if log_step >= 0.0 {
        Some(format!("{:.0}", tick.value))
    } else {
        let decimal_places = (-log_step).ceil() as usize;
        Some(format!("{:.*}", decimal_places, tick.value))
    }
}

/// Generate ticks covering `[min, max]` with a nice step aiming at `target` divisions.
///
/// Values are computed from an integer index so that zero is always hit exactly.
pub fn ticks(min: f64, max: f64, target: f64) -> Vec<Tick> {
    const MAX_TICKS: i64 = 1000;

    let span = max - min;
    if !span.is_finite() || span <= 0.0 {
        return Vec::new();
    }

    let step = nice_step(span / target.max(1.0));
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    if last < first {
        return Vec::new();
    }

    (first..=last.min(first + MAX_TICKS))
        .map(|idx| Tick::new(idx as f64 * step, step))
        .collect()
}

/// Calculate a "nice" step size for grid lines based on the desired number of divisions.
/// Returns a value that is a multiple of 1, 2, 5, or 10 times a power of 10.
pub fn nice_step(raw: f64) -> f64 {
    const NICE_STEP_BASES: [f64; 4] = [1.0, 2.0, 5.0, 10.0];
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    let exp = raw.log10().floor();
    let base = 10.0_f64.powf(exp);
    for &m in &NICE_STEP_BASES {
        if raw <= m * base {
            return m * base;
        }
    }
    base * 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_steps() {
        assert_eq!(nice_step(1.6), 2.0);
        assert_eq!(nice_step(0.4), 0.5);
        assert_eq!(nice_step(7.0), 10.0);
        assert_eq!(nice_step(0.0), 1.0);
        assert_eq!(nice_step(f64::NAN), 1.0);
    }

    #[test]
    fn symmetric_ticks_hit_zero() {
        let ticks = ticks(-8.0, 8.0, 10.0);
        let values: Vec<f64> = ticks.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![-8.0, -6.0, -4.0, -2.0, 0.0, 2.0, 4.0, 6.0, 8.0]);
        assert!(ticks.iter().any(Tick::is_zero));
    }

    #[test]
    fn ticks_stay_inside_range() {
        let ticks = ticks(-4.5, 4.5, 10.0);
        assert!(ticks.iter().all(|t| (-4.5..=4.5).contains(&t.value)));
        assert_eq!(ticks.first().map(|t| t.value), Some(-4.0));
    }

    #[test]
    fn empty_range_has_no_ticks() {
        assert!(ticks(1.0, 1.0, 10.0).is_empty());
        assert!(ticks(2.0, 1.0, 10.0).is_empty());
    }

    #[test]
    fn labels_skip_origin() {
        assert_eq!(tick_label(Tick::new(0.0, 2.0)), None);
        assert_eq!(tick_label(Tick::new(-6.0, 2.0)).as_deref(), Some("-6"));
        assert_eq!(tick_label(Tick::new(0.5, 0.5)).as_deref(), Some("0.5"));
        assert_eq!(tick_label(Tick::new(0.25, 0.05)).as_deref(), Some("0.25"));
    }
}
