//! Colormap discretization.
//!
//! Converts a continuous color function into stepped bins: either N
//! equal-width bins, or irregular bins defined by an explicit cutoff list.

use super::function::{ColorFunction, ColorStop, SegmentedColormap};
use crate::error::{HadleyError, Result};

/// Resolve the bin count: an explicit count of 3 or more is honored,
/// anything else defaults to 256 (effectively continuous).
pub fn calc_bins(bins: Option<u32>) -> usize {
    match bins {
        Some(n) if n >= 3 => n as usize,
        _ => 256,
    }
}

/// Discretize a color function into `bins` equal-width stepped bins.
///
/// Each bin's entry color equals the previous bin's exit color, so the
/// discretization itself introduces no discontinuity at bin boundaries;
/// every bin renders flat as the color sampled at its right edge.
pub fn discretize_equal(base: &dyn ColorFunction, bins: usize) -> SegmentedColormap {
    let mut channels: [Vec<ColorStop>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    let mut prev = base.sample(0.0);

    for cut_num in 0..=bins {
        let x = (cut_num as f64 / bins as f64).min(1.0);
        let (entry, exit) = if cut_num == 0 {
            let y = base.sample(0.0);
            (y, y)
        } else {
            // Exit color sampled on the bins-1 grid; the base clamps
            // positions past 1
            let exit = base.sample(cut_num as f64 / (bins - 1) as f64);
            (prev, exit)
        };
        for (c, stops) in channels.iter_mut().enumerate() {
            stops.push(ColorStop {
                x,
                below: entry[c],
                above: exit[c],
            });
        }
        prev = exit;
    }

    let [red, green, blue] = channels;
    SegmentedColormap::new(format!("{}_binned", base.name()), red, green, blue).with_levels(bins)
}

/// Discretize a color function into irregular bins defined by a sorted
/// cutoff list.
///
/// Cutoffs are normalized to [0, 1] by shift-and-scale (handles lists that
/// cross zero), the domain is closed with 0 and 1 where needed, and each
/// bin takes one flat color sampled at its midpoint.
pub fn discretize_uneven(base: &dyn ColorFunction, cutoffs: &[f64]) -> Result<SegmentedColormap> {
    if cutoffs.is_empty() {
        return Err(HadleyError::Config {
            message: "Cutoff list is empty".to_string(),
        });
    }

    let shift = cutoffs[0].abs();
    let denom = cutoffs[cutoffs.len() - 1].abs() + shift;
    if denom == 0.0 {
        return Err(HadleyError::Config {
            message: "Cutoff list spans a zero-width range".to_string(),
        });
    }

    let mut positions: Vec<f64> = cutoffs.iter().map(|c| (c + shift) / denom).collect();
    if positions[0] != 0.0 {
        positions.insert(0, 0.0);
    }
    if positions[positions.len() - 1] != 1.0 {
        positions.push(1.0);
    }

    let nbins = positions.len() - 1;
    let colors: Vec<[f64; 3]> = (0..nbins)
        .map(|n| base.sample((2 * n + 1) as f64 / (2 * nbins) as f64))
        .collect();

    let mut channels: [Vec<ColorStop>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for (i, &x) in positions.iter().enumerate() {
        let entry = if i == 0 { colors[0] } else { colors[i - 1] };
        let exit = if i == positions.len() - 1 {
            colors[i - 1]
        } else {
            colors[i]
        };
        for (c, stops) in channels.iter_mut().enumerate() {
            stops.push(ColorStop {
                x,
                below: entry[c],
                above: exit[c],
            });
        }
    }

    let [red, green, blue] = channels;
    Ok(SegmentedColormap::new(
        format!("{}_uneven", base.name()),
        red,
        green,
        blue,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormaps::function::Channel;

    fn ramp() -> SegmentedColormap {
        let stops = vec![ColorStop::flat(0.0, 0.0), ColorStop::flat(1.0, 1.0)];
        SegmentedColormap::new("ramp", stops.clone(), stops.clone(), stops)
    }

    #[test]
    fn test_calc_bins() {
        assert_eq!(calc_bins(None), 256);
        assert_eq!(calc_bins(Some(0)), 256);
        assert_eq!(calc_bins(Some(2)), 256);
        assert_eq!(calc_bins(Some(3)), 3);
        assert_eq!(calc_bins(Some(10)), 10);
    }

    #[test]
    fn test_equal_bins_structure() {
        let cmap = discretize_equal(&ramp(), 4);
        let stops = cmap.stops(Channel::Red);
        assert_eq!(stops.len(), 5);
        assert_eq!(stops[0].x, 0.0);
        assert_eq!(stops[4].x, 1.0);
        assert_eq!(cmap.levels(), Some(4));
    }

    #[test]
    fn test_equal_bins_continuity() {
        // Every bin's entry color equals the previous bin's exit color
        let cmap = discretize_equal(&ramp(), 8);
        for channel in Channel::ALL {
            let stops = cmap.stops(channel);
            for pair in stops.windows(2) {
                assert_eq!(pair[1].below, pair[0].above);
            }
        }
    }

    #[test]
    fn test_equal_bins_render_flat() {
        // Within a bin the color is constant (the right-edge sample)
        let cmap = discretize_equal(&ramp(), 4);
        let a = cmap.sample(0.30)[0];
        let b = cmap.sample(0.45)[0];
        assert_eq!(a, b);
    }

    #[test]
    fn test_uneven_normalization_crossing_zero() {
        // shift = 10, denom = 20 -> cutoffs map to 0, 0.25, 0.5, 0.75, 1
        let cmap = discretize_uneven(&ramp(), &[-10.0, -5.0, 0.0, 5.0, 10.0]).unwrap();
        let stops = cmap.stops(Channel::Red);
        let positions: Vec<f64> = stops.iter().map(|s| s.x).collect();
        assert_eq!(positions, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_uneven_closes_domain() {
        // Positive-only cutoffs do not reach 0 after normalization, so a
        // leading 0 is added; the list ends at 1 already
        let cmap = discretize_uneven(&ramp(), &[5.0, 10.0]).unwrap();
        let stops = cmap.stops(Channel::Red);
        assert_eq!(stops[0].x, 0.0);
        assert_eq!(stops[stops.len() - 1].x, 1.0);
    }

    #[test]
    fn test_uneven_bins_are_flat_midpoint_colors() {
        let cmap = discretize_uneven(&ramp(), &[-10.0, 0.0, 10.0]).unwrap();
        // Two bins: midpoints 0.25 and 0.75 on the base ramp
        assert!((cmap.sample(0.2)[0] - 0.25).abs() < 1e-12);
        assert!((cmap.sample(0.8)[0] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_uneven_degenerate_cutoffs() {
        assert!(discretize_uneven(&ramp(), &[]).is_err());
        assert!(discretize_uneven(&ramp(), &[0.0, 0.0]).is_err());
    }
}
