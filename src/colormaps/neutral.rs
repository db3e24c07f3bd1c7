//! Neutral band insertion.
//!
//! Carves a flat "neutral" region into a discretized colormap around a
//! chosen center, visually suppressing near-zero noise. Difference scales
//! may use a two-tone neutral that marks the exact zero crossing.

use super::function::{Channel, ColorFunction, ColorStop, SegmentedColormap};
use crate::error::{HadleyError, Result};

/// Neutral band coloring
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NeutralTone {
    /// One grey level across the whole band
    Flat(f64),
    /// Two grey levels split at the band center (difference scales)
    TwoTone { low: f64, high: f64 },
}

/// Insert a neutral band spanning `[low_x, high_x]` into a colormap.
///
/// Stops inside the band are removed and replaced by band-boundary stops
/// transitioning from the sampled base color into the neutral tone and
/// back out. A two-tone neutral additionally gets a stop exactly at
/// `center` switching from the low tone to the high tone.
///
/// A band of zero or negative width disables the feature and returns the
/// colormap unchanged; a band extending past [0, 1] is a fatal
/// configuration error.
pub fn insert_neutral(
    cmap: SegmentedColormap,
    low_x: f64,
    high_x: f64,
    tone: NeutralTone,
    center: f64,
) -> Result<SegmentedColormap> {
    if high_x - low_x <= 0.0 {
        return Ok(cmap);
    }
    if low_x < 0.0 || high_x > 1.0 {
        return Err(HadleyError::NeutralOutOfRange {
            low: low_x,
            high: high_x,
        });
    }

    let entry_color = cmap.sample(low_x);
    let exit_color = cmap.sample(high_x);
    let (low_tone, high_tone) = match tone {
        NeutralTone::Flat(v) => (v, v),
        NeutralTone::TwoTone { low, high } => (low, high),
    };
    let two_tone = matches!(tone, NeutralTone::TwoTone { .. });

    let mut channels: [Vec<ColorStop>; 3] = [Vec::new(), Vec::new(), Vec::new()];
    for (c, channel) in Channel::ALL.into_iter().enumerate() {
        // Existing stops on the band (boundaries included) give way to the
        // replacement stops below
        let mut stops: Vec<ColorStop> = cmap
            .stops(channel)
            .iter()
            .filter(|s| s.x < low_x || s.x > high_x)
            .copied()
            .collect();
        stops.push(ColorStop {
            x: low_x,
            below: entry_color[c],
            above: low_tone,
        });
        if two_tone {
            stops.push(ColorStop {
                x: center,
                below: low_tone,
                above: high_tone,
            });
        }
        stops.push(ColorStop {
            x: high_x,
            below: high_tone,
            above: exit_color[c],
        });
        channels[c] = stops;
    }

    let [red, green, blue] = channels;
    let mut out = SegmentedColormap::new(format!("{}_neutral", cmap.name()), red, green, blue);
    if let Some(levels) = cmap.levels() {
        out.set_levels(levels);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormaps::discretize::discretize_equal;

    fn ramp() -> SegmentedColormap {
        let stops = vec![ColorStop::flat(0.0, 0.0), ColorStop::flat(1.0, 1.0)];
        SegmentedColormap::new("ramp", stops.clone(), stops.clone(), stops)
    }

    #[test]
    fn test_band_is_flat_neutral() {
        let binned = discretize_equal(&ramp(), 10);
        let cmap = insert_neutral(binned, 0.4, 0.6, NeutralTone::Flat(0.85), 0.0).unwrap();
        let mid = cmap.sample(0.5);
        assert_eq!(mid, [0.85, 0.85, 0.85]);
    }

    #[test]
    fn test_zero_width_is_noop() {
        let binned = discretize_equal(&ramp(), 10);
        let before: Vec<ColorStop> = binned.stops(Channel::Red).to_vec();
        let cmap = insert_neutral(binned, 0.5, 0.5, NeutralTone::Flat(0.85), 0.0).unwrap();
        assert_eq!(cmap.stops(Channel::Red), before.as_slice());
    }

    #[test]
    fn test_out_of_range_is_fatal() {
        let binned = discretize_equal(&ramp(), 10);
        let err = insert_neutral(binned, -0.1, 0.2, NeutralTone::Flat(0.85), 0.0).unwrap_err();
        assert!(matches!(err, HadleyError::NeutralOutOfRange { .. }));

        let binned = discretize_equal(&ramp(), 10);
        assert!(insert_neutral(binned, 0.9, 1.1, NeutralTone::Flat(0.85), 0.0).is_err());
    }

    #[test]
    fn test_domain_closure_preserved() {
        let binned = discretize_equal(&ramp(), 10);
        let cmap = insert_neutral(binned, 0.4, 0.6, NeutralTone::Flat(0.85), 0.0).unwrap();
        for channel in Channel::ALL {
            let stops = cmap.stops(channel);
            assert_eq!(stops[0].x, 0.0);
            assert_eq!(stops[stops.len() - 1].x, 1.0);
        }
    }

    #[test]
    fn test_no_duplicate_positions() {
        // Band boundaries landing exactly on existing stops replace them
        let binned = discretize_equal(&ramp(), 10);
        let cmap = insert_neutral(binned, 0.4, 0.6, NeutralTone::Flat(0.85), 0.0).unwrap();
        for channel in Channel::ALL {
            let stops = cmap.stops(channel);
            for pair in stops.windows(2) {
                assert!(pair[0].x < pair[1].x);
            }
        }
    }

    #[test]
    fn test_two_tone_center_stop() {
        let binned = discretize_equal(&ramp(), 10);
        let cmap = insert_neutral(
            binned,
            0.4,
            0.6,
            NeutralTone::TwoTone {
                low: 0.82,
                high: 0.88,
            },
            0.5,
        )
        .unwrap();
        // Just below center: low tone; at and above center: high tone
        assert_eq!(cmap.sample(0.45), [0.82, 0.82, 0.82]);
        assert_eq!(cmap.sample(0.55), [0.88, 0.88, 0.88]);
    }

    #[test]
    fn test_band_at_top_of_scale() {
        // All-negative scales put the band against the upper boundary
        let binned = discretize_equal(&ramp(), 10);
        let cmap = insert_neutral(binned, 0.9, 1.0, NeutralTone::Flat(0.85), 0.0).unwrap();
        assert_eq!(cmap.sample(1.0), [0.85, 0.85, 0.85]);
        let stops = cmap.stops(Channel::Red);
        assert_eq!(stops[stops.len() - 1].x, 1.0);
    }
}
