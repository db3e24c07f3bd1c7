//! Builtin color functions.
//!
//! The red/blue difference map and the cool map carry the exact segment
//! data of the long-standing custom maps used for emissions plots. The
//! perceptual maps (viridis, magma, plasma) are anchor-list
//! approximations; coolwarm/rdbu are diverging anchor maps.

use super::function::{ColorStop, SegmentedColormap};

fn flat_stops(points: &[(f64, f64)]) -> Vec<ColorStop> {
    points.iter().map(|&(x, v)| ColorStop::flat(x, v)).collect()
}

/// Red/blue difference map: blue for negative, white at the center, red
/// for positive. The near-center breakpoints at 0.4999/0.5001 give a
/// sharp white line at exactly zero.
pub fn rb_diff() -> SegmentedColormap {
    let red = flat_stops(&[
        (0.0, 0.19140625),
        (0.125, 0.26953125),
        (0.25, 0.453125),
        (0.375, 0.66796875),
        (0.4999, 0.875),
        (0.5, 1.0),
        (0.5001, 0.9921875),
        (0.625, 0.98828125),
        (0.75, 0.953125),
        (0.875, 0.83984375),
        (1.0, 0.64453125),
    ]);
    let green = flat_stops(&[
        (0.0, 0.2109375),
        (0.125, 0.45703125),
        (0.25, 0.67578125),
        (0.375, 0.84765625),
        (0.4999, 0.94921875),
        (0.5, 1.0),
        (0.5001, 0.875),
        (0.625, 0.6796875),
        (0.75, 0.42578125),
        (0.875, 0.1875),
        (1.0, 0.0),
    ]);
    let blue = flat_stops(&[
        (0.0, 0.58203125),
        (0.125, 0.703125),
        (0.25, 0.81640625),
        (0.375, 0.91015625),
        (0.4999, 0.96875),
        (0.5, 1.0),
        (0.5001, 0.5625),
        (0.625, 0.37890625),
        (0.75, 0.26171875),
        (0.875, 0.15234375),
        (1.0, 0.1484375),
    ]);
    SegmentedColormap::new("mod_diff", red, green, blue)
}

/// Cool map for all-negative fields: deep blue through cyan toward white
pub fn cool() -> SegmentedColormap {
    let red = flat_stops(&[(0.0, 0.0), (0.746, 0.0), (1.0, 0.0)]);
    let green = flat_stops(&[(0.0, 0.0), (0.365, 0.0), (1.0, 1.0)]);
    let blue = flat_stops(&[(0.0, 0.0916), (0.365, 1.0), (1.0, 1.0)]);
    SegmentedColormap::new("mod_cool", red, green, blue)
}

/// Summer map: green to yellow
pub fn summer() -> SegmentedColormap {
    let red = flat_stops(&[(0.0, 0.0), (1.0, 1.0)]);
    let green = flat_stops(&[(0.0, 0.5), (1.0, 1.0)]);
    let blue = flat_stops(&[(0.0, 0.4), (1.0, 0.4)]);
    SegmentedColormap::new("summer", red, green, blue)
}

/// Reversed summer map (yellow to green), the default standard-scale map
pub fn summer_r() -> SegmentedColormap {
    let red = flat_stops(&[(0.0, 1.0), (1.0, 0.0)]);
    let green = flat_stops(&[(0.0, 1.0), (1.0, 0.5)]);
    let blue = flat_stops(&[(0.0, 0.4), (1.0, 0.4)]);
    SegmentedColormap::new("summer_r", red, green, blue)
}

const VIRIDIS_ANCHORS: [[f64; 3]; 11] = [
    [0.267, 0.005, 0.329],
    [0.283, 0.141, 0.458],
    [0.254, 0.265, 0.530],
    [0.207, 0.372, 0.553],
    [0.164, 0.471, 0.558],
    [0.128, 0.567, 0.551],
    [0.135, 0.659, 0.518],
    [0.267, 0.749, 0.441],
    [0.478, 0.821, 0.318],
    [0.741, 0.873, 0.150],
    [0.993, 0.906, 0.144],
];

const MAGMA_ANCHORS: [[f64; 3]; 11] = [
    [0.001, 0.000, 0.014],
    [0.087, 0.058, 0.232],
    [0.232, 0.060, 0.438],
    [0.390, 0.100, 0.502],
    [0.550, 0.161, 0.506],
    [0.716, 0.215, 0.475],
    [0.868, 0.288, 0.409],
    [0.968, 0.440, 0.358],
    [0.995, 0.624, 0.427],
    [0.997, 0.800, 0.550],
    [0.987, 0.991, 0.750],
];

const PLASMA_ANCHORS: [[f64; 3]; 9] = [
    [0.050, 0.030, 0.528],
    [0.294, 0.012, 0.631],
    [0.492, 0.012, 0.658],
    [0.658, 0.134, 0.588],
    [0.798, 0.280, 0.470],
    [0.899, 0.422, 0.361],
    [0.973, 0.580, 0.254],
    [0.996, 0.766, 0.220],
    [0.940, 0.975, 0.131],
];

const COOLWARM_ANCHORS: [[f64; 3]; 9] = [
    [0.231, 0.298, 0.753],
    [0.384, 0.510, 0.918],
    [0.553, 0.690, 0.996],
    [0.722, 0.816, 0.976],
    [0.867, 0.867, 0.867],
    [0.961, 0.769, 0.678],
    [0.957, 0.604, 0.482],
    [0.871, 0.376, 0.302],
    [0.753, 0.157, 0.184],
];

fn anchor_map(name: &str, anchors: &[[f64; 3]], reverse: bool) -> SegmentedColormap {
    if reverse {
        let reversed: Vec<[f64; 3]> = anchors.iter().rev().copied().collect();
        SegmentedColormap::from_rgb_list(name, &reversed)
    } else {
        SegmentedColormap::from_rgb_list(name, anchors)
    }
}

/// Viridis (anchor approximation)
pub fn viridis() -> SegmentedColormap {
    anchor_map("viridis", &VIRIDIS_ANCHORS, false)
}

/// Reversed viridis
pub fn viridis_r() -> SegmentedColormap {
    anchor_map("viridis_r", &VIRIDIS_ANCHORS, true)
}

/// Magma (anchor approximation)
pub fn magma() -> SegmentedColormap {
    anchor_map("magma", &MAGMA_ANCHORS, false)
}

/// Reversed magma
pub fn magma_r() -> SegmentedColormap {
    anchor_map("magma_r", &MAGMA_ANCHORS, true)
}

/// Plasma (anchor approximation)
pub fn plasma() -> SegmentedColormap {
    anchor_map("plasma", &PLASMA_ANCHORS, false)
}

/// Reversed plasma
pub fn plasma_r() -> SegmentedColormap {
    anchor_map("plasma_r", &PLASMA_ANCHORS, true)
}

/// Coolwarm diverging map - blue to red through grey
pub fn coolwarm() -> SegmentedColormap {
    anchor_map("coolwarm", &COOLWARM_ANCHORS, false)
}

/// RdBu diverging map - red to blue (reversed coolwarm)
pub fn rdbu() -> SegmentedColormap {
    anchor_map("rdbu", &COOLWARM_ANCHORS, true)
}
