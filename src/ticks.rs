//! Legend tick planning and label rendering.
//!
//! Tick count follows the bin count when it is small enough to label,
//! boundary ticks appear only on bounded scales, and a zero tick is
//! guaranteed on any scale that spans zero. Labels pick their precision
//! from the magnitude of a reference tick so a legend reads consistently.

/// Ordered legend tick values plus their rendered labels.
#[derive(Debug, Clone)]
pub struct TickSet {
    values: Vec<f64>,
    labels: Vec<String>,
}

impl TickSet {
    /// Build a tick set from sorted values, rendering labels against the
    /// set-wide reference magnitude. Unbounded scales with more than two
    /// ticks get `<`/`>` prefixes on the first and last label to denote
    /// open-ended bins.
    pub fn from_values(values: Vec<f64>, bound_scale: bool) -> Self {
        let reference = reference_magnitude(&values);
        let mut labels: Vec<String> = values.iter().map(|&v| format_tick(v, reference)).collect();
        if !bound_scale && labels.len() > 2 {
            labels[0] = format!("<{}", labels[0]);
            let last = labels.len() - 1;
            labels[last] = format!(">{}", labels[last]);
        }
        Self { values, labels }
    }

    /// Build a tick set directly from an explicit cutoff list. The values
    /// are the original cutoffs; each label uses its own magnitude.
    pub fn from_cutoffs(cutoffs: &[f64]) -> Self {
        let labels = cutoffs.iter().map(|&v| format_tick(v, v.abs())).collect();
        Self {
            values: cutoffs.to_vec(),
            labels,
        }
    }

    /// Tick values in ascending order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Rendered labels, parallel to [`values`](Self::values)
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of ticks
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the set holds no ticks
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Number of legend ticks implied by the bin count, plus one for the
/// closing boundary. Explicit counts win; unlabelable bin counts (256
/// "continuous" bins) fall back to 6.
pub fn calc_tick_total(bins: usize, num_ticks: Option<u32>) -> usize {
    if let Some(n) = num_ticks {
        n as usize + 1
    } else if bins > 2 && bins < 100 {
        bins + 1
    } else {
        6
    }
}

/// Plan the legend ticks for a `[vmin, vmax]` scale.
///
/// Interior ticks are evenly spaced; the boundary ticks are included only
/// when `bound_scale` is set. Ticks within 1e-8 of zero snap to exactly 0,
/// a zero tick is inserted on scales spanning zero, and the two neutral
/// band edges are inserted when `neutral_range` is given.
pub fn plan_ticks(
    vmin: f64,
    vmax: f64,
    bins: usize,
    num_ticks: Option<u32>,
    bound_scale: bool,
    neutral_range: Option<(f64, f64)>,
) -> TickSet {
    let total = calc_tick_total(bins, num_ticks);
    let mut values = Vec::with_capacity(total + 3);

    for x in 0..total {
        if x != 0 && x != total - 1 {
            let mut tick = (x as f64 / (total - 1) as f64) * (vmax - vmin) + vmin;
            if tick.abs() < 1e-8 {
                tick = 0.0;
            }
            values.push(tick);
        } else if bound_scale {
            values.push(if x == 0 { vmin } else { vmax });
        }
    }

    // Difference scales always label the zero crossing
    if vmin < 0.0 && vmax > 0.0 && !values.iter().any(|&v| v == 0.0) {
        values.push(0.0);
    }

    if let Some((low, high)) = neutral_range {
        for edge in [low, high] {
            if !values.iter().any(|&v| v == edge) {
                values.push(edge);
            }
        }
    }

    values.sort_by(|a, b| a.total_cmp(b));
    values.dedup();

    TickSet::from_values(values, bound_scale)
}

fn reference_magnitude(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let last = values[values.len() - 1].abs();
    if last != 0.0 {
        last
    } else {
        values[values.len() / 2].abs()
    }
}

/// Render one tick value at a precision chosen from the reference
/// magnitude.
pub fn format_tick(tick: f64, reference: f64) -> String {
    if reference >= 1e5 || reference < 0.02 {
        format!("{:.2e}", tick)
    } else if reference >= 20.0 {
        // Truncate toward zero; adding 0.0 normalizes a negative zero.
        // Formatting the f64 directly keeps magnitudes past i64 intact
        format!("{:.0}", tick.trunc() + 0.0)
    } else if reference >= 2.0 {
        format!("{:.1}", tick)
    } else if reference >= 0.2 {
        format!("{:.2}", tick)
    } else {
        format!("{:.3}", tick)
    }
}
