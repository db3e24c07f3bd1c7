//! Scale classification and color scale synthesis.
//!
//! This module decides whether a field needs a standard (one-sided) or
//! difference (signed, zero-symmetric) color scale, rebalances the limits
//! accordingly, and assembles the final colormap and legend ticks from the
//! discretizer, the neutral inserter, and the tick planner.
//!
//! Degenerate inputs (negative-only data, sparse difference data,
//! percentile scales collapsing to a point) are corrected automatically;
//! every correction is logged so it stays auditable.

use ndarray::ArrayViewD;
use std::sync::Arc;
use tracing::{info, warn};

use crate::colormaps::{
    builtin, calc_bins, discretize_equal, discretize_uneven, insert_neutral, ColorFunction,
    ColormapRegistry, NeutralTone, SegmentedColormap,
};
use crate::config::{parse_cutoffs, ScaleOptions, TWO_TONE_NEUTRAL, TWO_TONE_NEUTRAL_HIGH};
use crate::error::Result;
use crate::limits::{DataStats, Limit};
use crate::ticks::{plan_ticks, TickSet};

/// The resolved, mutually consistent scale bounds after classification.
#[derive(Debug, Clone)]
pub struct ScaleContext {
    /// Lower scale bound
    pub vmin: Limit,
    /// Upper scale bound
    pub vmax: Limit,
    /// Neutral band extent
    pub neutral: Limit,
}

/// The finished product of scale synthesis: a discretized colormap ready
/// for sampling by a renderer, and the legend tick set.
#[derive(Debug, Clone)]
pub struct ScaleResult {
    /// The synthesized colormap
    pub colormap: SegmentedColormap,
    /// Legend tick values and labels
    pub ticks: TickSet,
    /// Resolved scale bounds
    pub context: ScaleContext,
    /// Whether the scale was classified as difference data
    pub is_difference: bool,
}

impl ScaleResult {
    /// Resolved scale minimum
    pub fn vmin(&self) -> f64 {
        self.context.vmin.value()
    }

    /// Resolved scale maximum
    pub fn vmax(&self) -> f64 {
        self.context.vmax.value()
    }
}

/// Where the base color function came from
enum BaseColormap {
    Named(Arc<dyn ColorFunction>),
    ColorList(SegmentedColormap),
    Builtin(SegmentedColormap),
}

impl BaseColormap {
    fn as_fn(&self) -> &dyn ColorFunction {
        match self {
            BaseColormap::Named(map) => map.as_ref(),
            BaseColormap::ColorList(map) => map,
            BaseColormap::Builtin(map) => map,
        }
    }
}

/// Synthesize a color scale and legend for one data array.
///
/// This is the single entry point of the core: a pure function from the
/// data's summary statistics and the option bundle to a colormap and tick
/// set (plus, optionally, the report-max side file).
pub fn build_scale(
    data: ArrayViewD<'_, f64>,
    options: &ScaleOptions,
    registry: &ColormapRegistry,
) -> Result<ScaleResult> {
    options.validate()?;
    let stats = DataStats::from_array(data, options.mask_less)?;
    let (context, is_difference) = classify(&stats, options)?;
    let ncolor = options.neutral_color(is_difference);

    let (colormap, ticks) = if is_difference {
        difference_scale(&context, ncolor, options, registry)?
    } else {
        standard_scale(&context, ncolor, options, registry)?
    };

    if let Some(path) = &options.report_max {
        info!(
            vmax = context.vmax.value(),
            path = %path.display(),
            "Reporting scale maximum"
        );
        std::fs::write(path, context.vmax.value().to_string())?;
    }

    Ok(ScaleResult {
        colormap,
        ticks,
        context,
        is_difference,
    })
}

/// Resolve the scale bounds and decide standard vs. difference.
///
/// Difference data is detected when the data and the resolved bounds both
/// straddle zero (or when forced); its bounds are then rebalanced to be
/// symmetric around zero. All-negative fields get their vmin recomputed as
/// the complement of vmax so the scale still reads bottom-up.
pub fn classify(stats: &DataStats, options: &ScaleOptions) -> Result<(ScaleContext, bool)> {
    let mut vmax = Limit::resolve(&options.vmax, stats)?;
    let mut vmin = Limit::resolve(&options.vmin, stats)?;
    let mut neutral = Limit::resolve(&options.neutral, stats)?;

    if vmax.value() < 0.0 {
        warn!(vmax = vmax.value(), "vmax is negative, may result in plotting error");
        if vmin.value() <= 0.0 && !options.no_auto {
            warn!("vmax and vmin are both negative");
            vmin = match vmax.percentile() {
                Some(p) => {
                    info!(percentile = 100.0 - p, "Resetting vmin to complement percentile");
                    Limit::from_percentile(100.0 - p, stats)
                }
                None => {
                    info!(vmin = -vmax.value(), "Resetting vmin to negated vmax");
                    Limit::absolute(-vmax.value(), stats)
                }
            };
            // Only a percentile neutral has a meaningful complement; an
            // absolute neutral keeps its value
            if let Some(p) = neutral.percentile() {
                neutral = Limit::from_percentile(100.0 - p, stats);
            }
        }
    }

    let is_difference = options.force_diff
        || (stats.min() < 0.0
            && stats.max() > 0.0
            && vmin.value() < 0.0
            && vmax.value() >= 0.0);

    if is_difference {
        info!("Difference data detected");
        let (lo, hi) = rebalance_difference(vmin, vmax, stats, options.no_auto);
        vmin = lo;
        vmax = hi;
    } else {
        info!("Standard plot data detected");
    }

    Ok((ScaleContext { vmin, vmax, neutral }, is_difference))
}

/// Rebalance difference-scale bounds around zero.
fn rebalance_difference(
    mut vmin: Limit,
    mut vmax: Limit,
    stats: &DataStats,
    no_auto: bool,
) -> (Limit, Limit) {
    // A percentile vmax pins vmin to the complement percentile. The nudge
    // keeps the complement of 100% from degenerating to a forced zero.
    if let Some(p) = vmax.percentile() {
        let complement = 100.0 - p + 1e-16;
        info!(complement, "Resetting vmin to balance scale");
        vmin = Limit::from_percentile(complement, stats);
    }

    // Sparse data: both percentiles land on the same value, leaving a
    // zero-width scale. Rescue vmax from the data maximum instead.
    let tolerance = 1e-12 * vmax.value().abs().max(1.0);
    if (vmin.value() - vmax.value()).abs() <= tolerance && vmax.is_percentile() {
        let p = vmax.percentile().unwrap_or(100.0);
        let rescued = p / 100.0 * vmax.data_max();
        warn!(
            vmax = rescued,
            "Very sparse data, resetting scale max to percentage of data max"
        );
        vmax = vmax.with_value(rescued);
    }

    if !no_auto {
        // Enforce magnitude symmetry: the larger side wins
        if vmin.value().abs() > vmax.value() && vmin.value() < 0.0 {
            info!(vmax = vmin.value().abs(), "Setting vmax to absolute value of vmin");
            vmax = Limit::absolute(vmin.value().abs(), stats);
        } else {
            info!(vmin = -vmax.value(), "Setting vmin to negative of vmax");
            vmin = Limit::absolute(-vmax.value(), stats);
        }
    }

    (vmin, vmax)
}

/// Fraction of the normalized scale the neutral band extends from its
/// center. Percentile neutrals are a direct fraction; absolute neutrals
/// measure from vmin and subtract the center offset.
fn scale_frac(neutral: &Limit, vmin: f64, vmax: f64, scale_center: f64) -> f64 {
    match neutral.percentile() {
        Some(p) => p / 100.0,
        None => (neutral.value() - vmin) / (vmax - vmin) - scale_center,
    }
}

/// Pick the base color function: an explicit color list, a registry name,
/// or the mode's builtin default.
fn select_base(
    spec: Option<&str>,
    default: SegmentedColormap,
    registry: &ColormapRegistry,
) -> Result<BaseColormap> {
    match spec {
        Some(s) if s.contains(',') => {
            let names: Vec<&str> = s.split(',').map(str::trim).collect();
            Ok(BaseColormap::ColorList(SegmentedColormap::from_color_list(
                "custom", &names,
            )?))
        }
        Some(s) => Ok(BaseColormap::Named(registry.get(s)?)),
        None => Ok(BaseColormap::Builtin(default)),
    }
}

/// Build the colormap and ticks for standard (one-sided) data.
fn standard_scale(
    context: &ScaleContext,
    ncolor: f64,
    options: &ScaleOptions,
    registry: &ColormapRegistry,
) -> Result<(SegmentedColormap, TickSet)> {
    let vmin = context.vmin.value();
    let vmax = context.vmax.value();
    let frac = scale_frac(&context.neutral, vmin, vmax, 0.0);

    // All-negative scales use the cool map with the neutral band against
    // the top (zero end) of the scale
    let (base, low_x, high_x) = if vmin < 0.0 && vmax <= 0.0 {
        (BaseColormap::Builtin(builtin::cool()), frac, 1.0)
    } else {
        let base = select_base(options.cmap.as_deref(), builtin::summer_r(), registry)?;
        (base, 0.0, frac)
    };

    if let Some(cutoff_spec) = &options.cutoffs {
        let cutoffs = parse_cutoffs(cutoff_spec)?;
        let colormap = discretize_uneven(base.as_fn(), &cutoffs)?;
        return Ok((colormap, TickSet::from_cutoffs(&cutoffs)));
    }

    let bins = calc_bins(options.bins);
    let ticks = plan_ticks(vmin, vmax, bins, options.ticks, options.bound_scale, None);

    // An explicit color list is used as-is: no binning, no neutral band
    if let BaseColormap::ColorList(colormap) = base {
        return Ok((colormap, ticks));
    }

    let mut colormap = discretize_equal(base.as_fn(), bins);
    if frac > 0.0 {
        colormap = insert_neutral(colormap, low_x, high_x, NeutralTone::Flat(ncolor), 0.0)?;
        colormap.set_levels(if options.nfill { bins } else { 100_000 });
    }
    Ok((colormap, ticks))
}

/// Build the colormap and ticks for difference (signed) data.
fn difference_scale(
    context: &ScaleContext,
    ncolor: f64,
    options: &ScaleOptions,
    registry: &ColormapRegistry,
) -> Result<(SegmentedColormap, TickSet)> {
    let vmin = context.vmin.value();
    let vmax = context.vmax.value();
    let base = select_base(options.cmap.as_deref(), builtin::rb_diff(), registry)?;

    if let Some(cutoff_spec) = &options.cutoffs {
        let cutoffs = parse_cutoffs(cutoff_spec)?;
        let colormap = discretize_uneven(base.as_fn(), &cutoffs)?;
        return Ok((colormap, TickSet::from_cutoffs(&cutoffs)));
    }

    let bins = calc_bins(options.bins);
    let ticks = plan_ticks(vmin, vmax, bins, options.ticks, options.bound_scale, None);

    if let BaseColormap::ColorList(colormap) = base {
        return Ok((colormap, ticks));
    }

    let mut colormap = discretize_equal(base.as_fn(), bins);

    // With autoscaling the zero crossing sits at the scale center; without
    // it the center follows wherever zero actually lands
    let center = if options.no_auto {
        ((0.0 - vmin) / (vmax - vmin)).abs()
    } else {
        0.5
    };
    let frac = scale_frac(&context.neutral, vmin, vmax, center);
    let low_x = center - frac;
    let high_x = center + frac;

    let tone = if (ncolor - TWO_TONE_NEUTRAL).abs() < f64::EPSILON {
        NeutralTone::TwoTone {
            low: TWO_TONE_NEUTRAL,
            high: TWO_TONE_NEUTRAL_HIGH,
        }
    } else {
        NeutralTone::Flat(ncolor)
    };

    if frac > 0.0 {
        colormap = insert_neutral(colormap, low_x, high_x, tone, center)?;
        colormap.set_levels(if options.nfill { bins } else { 256 });
    }
    Ok((colormap, ticks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    fn stats_of(values: &[f64]) -> DataStats {
        let arr = Array1::from(values.to_vec()).into_dyn();
        DataStats::from_array(arr.view(), None).unwrap()
    }

    fn ramp(min: f64, max: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| min + (max - min) * i as f64 / (n - 1) as f64)
            .collect()
    }

    #[test]
    fn test_classify_standard() {
        // vmin resolves to 0, so the difference predicate fails even
        // though the data crosses zero
        let stats = stats_of(&ramp(-5.0, 10.0, 101));
        let options = ScaleOptions::default();
        let (context, is_difference) = classify(&stats, &options).unwrap();
        assert!(!is_difference);
        assert_eq!(context.vmin.value(), 0.0);
        assert!(context.vmax.value() > 0.0);
    }

    #[test]
    fn test_classify_difference_symmetry() {
        let stats = stats_of(&ramp(-100.0, 50.0, 301));
        let options = ScaleOptions {
            vmin: "5%".to_string(),
            ..Default::default()
        };
        let (context, is_difference) = classify(&stats, &options).unwrap();
        assert!(is_difference);
        let vmin = context.vmin.value();
        let vmax = context.vmax.value();
        assert!(vmin < 0.0 && vmax > 0.0);
        assert!((vmax + vmin).abs() < 1e-9 * vmax.abs());
    }

    #[test]
    fn test_classify_force_diff_rebalances() {
        // vmin "0" alone would classify standard; forcing the difference
        // path still derives a symmetric scale from vmax's complement
        let stats = stats_of(&ramp(-100.0, 50.0, 301));
        let options = ScaleOptions {
            force_diff: true,
            ..Default::default()
        };
        let (context, is_difference) = classify(&stats, &options).unwrap();
        assert!(is_difference);
        assert!((context.vmax.value() + context.vmin.value()).abs() < 1e-9);
    }

    #[test]
    fn test_classify_no_auto_keeps_bounds() {
        let stats = stats_of(&ramp(-100.0, 50.0, 301));
        let options = ScaleOptions {
            vmin: "-30".to_string(),
            vmax: "20".to_string(),
            no_auto: true,
            ..Default::default()
        };
        let (context, is_difference) = classify(&stats, &options).unwrap();
        assert!(is_difference);
        assert_eq!(context.vmin.value(), -30.0);
        assert_eq!(context.vmax.value(), 20.0);
    }

    #[test]
    fn test_classify_all_negative() {
        let stats = stats_of(&ramp(-100.0, -10.0, 91));
        let options = ScaleOptions {
            vmin: "5%".to_string(),
            ..Default::default()
        };
        let (context, is_difference) = classify(&stats, &options).unwrap();
        assert!(!is_difference);
        // vmin recomputed as the 5th percentile (complement of 95)
        assert!(context.vmin.value() < context.vmax.value());
        assert!(context.vmax.value() < 0.0);
    }

    #[test]
    fn test_all_negative_absolute_neutral_preserved() {
        let stats = stats_of(&ramp(-100.0, -10.0, 91));
        let options = ScaleOptions {
            vmin: "5%".to_string(),
            neutral: "-11".to_string(),
            ..Default::default()
        };
        let (context, _) = classify(&stats, &options).unwrap();
        // An absolute neutral spec keeps its value through the
        // all-negative correction
        assert_eq!(context.neutral.value(), -11.0);
        assert!(!context.neutral.is_percentile());
    }

    #[test]
    fn test_sparse_data_guard() {
        // Overwhelmingly-zero data: both complement percentiles land on 0
        let mut values = vec![0.0; 1000];
        values.push(-4.0);
        values.push(8.0);
        let stats = stats_of(&values);
        let options = ScaleOptions {
            force_diff: true,
            ..Default::default()
        };
        let (context, _) = classify(&stats, &options).unwrap();
        // Rescued vmax = 95% of the data max
        assert!((context.vmax.value() - 0.95 * 8.0).abs() < 1e-9);
        assert!(context.vmax.value() > 0.0);
        assert_eq!(context.vmin.value(), -context.vmax.value());
    }

    #[test]
    fn test_sparse_guard_fires_within_tolerance() {
        // The complement percentile lands a hair below vmax rather than
        // exactly on it; float noise this small still counts as collapsed
        let mut values = vec![0.0; 18];
        values.push(-1e-12);
        values.push(-5e-13);
        values.push(8.0);
        let stats = stats_of(&values);
        // 21 points: the 95th percentile sits exactly on a zero while the
        // 5th complement interpolates to roughly -5e-13
        assert_eq!(stats.percentile(95.0), 0.0);
        assert!(stats.percentile(5.0) < 0.0);

        let options = ScaleOptions {
            force_diff: true,
            ..Default::default()
        };
        let (context, _) = classify(&stats, &options).unwrap();
        assert!((context.vmax.value() - 0.95 * 8.0).abs() < 1e-9);
        assert_eq!(context.vmin.value(), -context.vmax.value());
    }

    #[test]
    fn test_scale_frac_percentile_and_absolute() {
        let stats = stats_of(&ramp(0.0, 100.0, 101));
        let pct = Limit::resolve("1%", &stats).unwrap();
        assert_eq!(scale_frac(&pct, 0.0, 100.0, 0.0), 0.01);

        let abs = Limit::resolve("30", &stats).unwrap();
        assert!((scale_frac(&abs, 0.0, 100.0, 0.0) - 0.3).abs() < 1e-12);
        assert!((scale_frac(&abs, -100.0, 100.0, 0.5) - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_difference_neutral_out_of_range() {
        let stats = stats_of(&ramp(-10.0, 10.0, 201));
        let options = ScaleOptions {
            force_diff: true,
            neutral: "80%".to_string(),
            ..Default::default()
        };
        let registry = ColormapRegistry::with_builtins();
        let context = classify(&stats, &options).unwrap().0;
        let result = difference_scale(&context, 0.82, &options, &registry);
        assert!(matches!(
            result.unwrap_err(),
            crate::error::HadleyError::NeutralOutOfRange { .. }
        ));
    }
}
