//! The color function capability and its piecewise-segmented implementation.
//!
//! Every producer of colors in this crate (builtin maps, explicit color
//! lists, discretized maps, maps with a neutral band carved in) is a
//! [`SegmentedColormap`]: per-channel ordered lists of [`ColorStop`]s with
//! linear interpolation between stops. Consumers depend only on the
//! [`ColorFunction`] trait so they never care which variant produced it.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::error::{HadleyError, Result};

/// Trait for continuous color functions over the normalized [0, 1] domain
pub trait ColorFunction: Send + Sync {
    /// Sample the color at a normalized position (clamped to [0, 1]).
    /// Channel values are in [0, 1].
    fn sample(&self, x: f64) -> [f64; 3];

    /// Get the name of this color function
    fn name(&self) -> &str;
}

/// One entry in a channel's piecewise-linear color function.
///
/// `below` is the channel value when approaching `x` from below, `above`
/// when approaching from above. Sampling exactly at `x` yields `above`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Normalized position in [0, 1]
    pub x: f64,
    /// Channel value approaching from below
    pub below: f64,
    /// Channel value approaching from above
    pub above: f64,
}

impl ColorStop {
    /// A stop with no discontinuity (same value on both sides)
    pub fn flat(x: f64, value: f64) -> Self {
        Self {
            x,
            below: value,
            above: value,
        }
    }
}

/// Color channel selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All channels in storage order
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// A piecewise-linear segmented colormap.
///
/// When `levels` is set the map is quantized: sampling positions snap to
/// that many evenly spaced levels first, so a neutral band can fill whole
/// color bins.
#[derive(Debug, Clone)]
pub struct SegmentedColormap {
    name: String,
    channels: [Vec<ColorStop>; 3],
    levels: Option<usize>,
}

impl SegmentedColormap {
    /// Build a colormap from per-channel stop lists.
    ///
    /// Stops are sorted ascending by position and channel values are
    /// clamped to [0, 1].
    pub fn new(
        name: impl Into<String>,
        red: Vec<ColorStop>,
        green: Vec<ColorStop>,
        blue: Vec<ColorStop>,
    ) -> Self {
        let mut channels = [red, green, blue];
        for stops in channels.iter_mut() {
            stops.sort_by(|a, b| a.x.total_cmp(&b.x));
            for stop in stops.iter_mut() {
                stop.below = stop.below.clamp(0.0, 1.0);
                stop.above = stop.above.clamp(0.0, 1.0);
            }
        }
        Self {
            name: name.into(),
            channels,
            levels: None,
        }
    }

    /// Build a smooth colormap from evenly spaced RGB anchors
    pub fn from_rgb_list(name: impl Into<String>, colors: &[[f64; 3]]) -> Self {
        let n = colors.len();
        let mut channels: [Vec<ColorStop>; 3] = [Vec::new(), Vec::new(), Vec::new()];
        for (i, color) in colors.iter().enumerate() {
            let x = if n == 1 {
                0.0
            } else {
                i as f64 / (n - 1) as f64
            };
            for (c, stops) in channels.iter_mut().enumerate() {
                stops.push(ColorStop::flat(x, color[c]));
            }
        }
        let [red, green, blue] = channels;
        Self::new(name, red, green, blue)
    }

    /// Build a smooth colormap from evenly spaced color names or hex codes
    pub fn from_color_list(name: impl Into<String>, colors: &[&str]) -> Result<Self> {
        let parsed: Vec<[f64; 3]> = colors
            .iter()
            .map(|c| parse_color(c))
            .collect::<Result<_>>()?;
        Ok(Self::from_rgb_list(name, &parsed))
    }

    /// The stop list for one channel
    pub fn stops(&self, channel: Channel) -> &[ColorStop] {
        &self.channels[channel.index()]
    }

    /// Quantization level count, if any
    pub fn levels(&self) -> Option<usize> {
        self.levels
    }

    /// Set the quantization level count
    pub fn set_levels(&mut self, levels: usize) {
        self.levels = Some(levels);
    }

    /// Builder-style variant of [`set_levels`](Self::set_levels)
    pub fn with_levels(mut self, levels: usize) -> Self {
        self.levels = Some(levels);
        self
    }

    fn sample_channel(stops: &[ColorStop], x: f64) -> f64 {
        if stops.is_empty() {
            return 0.0;
        }
        if x <= stops[0].x {
            return stops[0].above;
        }
        let last = stops[stops.len() - 1];
        if x >= last.x {
            return last.below;
        }
        // Position sits strictly between the first and last stop
        let mut i = 0;
        while i + 1 < stops.len() && stops[i + 1].x <= x {
            i += 1;
        }
        let lo = stops[i];
        let hi = stops[i + 1];
        if hi.x == lo.x {
            return hi.above;
        }
        let t = (x - lo.x) / (hi.x - lo.x);
        lo.above + (hi.below - lo.above) * t
    }
}

impl ColorFunction for SegmentedColormap {
    fn sample(&self, x: f64) -> [f64; 3] {
        let mut x = x.clamp(0.0, 1.0);
        if let Some(n) = self.levels {
            if n > 1 {
                x = (x * (n - 1) as f64).round() / (n - 1) as f64;
            }
        }
        [
            Self::sample_channel(&self.channels[0], x),
            Self::sample_channel(&self.channels[1], x),
            Self::sample_channel(&self.channels[2], x),
        ]
    }

    fn name(&self) -> &str {
        &self.name
    }
}

static NAMED_COLORS: Lazy<HashMap<&'static str, [f64; 3]>> = Lazy::new(|| {
    HashMap::from([
        ("black", [0.0, 0.0, 0.0]),
        ("white", [1.0, 1.0, 1.0]),
        ("red", [1.0, 0.0, 0.0]),
        ("green", [0.0, 0.5, 0.0]),
        ("blue", [0.0, 0.0, 1.0]),
        ("yellow", [1.0, 1.0, 0.0]),
        ("cyan", [0.0, 1.0, 1.0]),
        ("magenta", [1.0, 0.0, 1.0]),
        ("orange", [1.0, 0.647, 0.0]),
        ("purple", [0.5, 0.0, 0.5]),
        ("brown", [0.647, 0.165, 0.165]),
        ("pink", [1.0, 0.753, 0.796]),
        ("grey", [0.5, 0.5, 0.5]),
        ("gray", [0.5, 0.5, 0.5]),
        ("lightgrey", [0.827, 0.827, 0.827]),
        ("darkgrey", [0.663, 0.663, 0.663]),
        ("olive", [0.5, 0.5, 0.0]),
        ("navy", [0.0, 0.0, 0.5]),
        ("teal", [0.0, 0.5, 0.5]),
        ("lime", [0.0, 1.0, 0.0]),
        ("maroon", [0.5, 0.0, 0.0]),
        ("gold", [1.0, 0.843, 0.0]),
        // Single-letter matplotlib codes
        ("b", [0.0, 0.0, 1.0]),
        ("g", [0.0, 0.5, 0.0]),
        ("r", [1.0, 0.0, 0.0]),
        ("c", [0.0, 1.0, 1.0]),
        ("m", [1.0, 0.0, 1.0]),
        ("y", [1.0, 1.0, 0.0]),
        ("k", [0.0, 0.0, 0.0]),
        ("w", [1.0, 1.0, 1.0]),
    ])
});

/// Parse a color name or `#rrggbb` hex code into RGB channel values
pub fn parse_color(name: &str) -> Result<[f64; 3]> {
    let trimmed = name.trim().to_lowercase();
    if let Some(hex) = trimmed.strip_prefix('#') {
        if hex.len() == 6 {
            let parse_pair = |s: &str| u8::from_str_radix(s, 16);
            if let (Ok(r), Ok(g), Ok(b)) = (
                parse_pair(&hex[0..2]),
                parse_pair(&hex[2..4]),
                parse_pair(&hex[4..6]),
            ) {
                return Ok([r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0]);
            }
        }
        return Err(HadleyError::InvalidColor {
            name: name.to_string(),
        });
    }
    NAMED_COLORS
        .get(trimmed.as_str())
        .copied()
        .ok_or_else(|| HadleyError::InvalidColor {
            name: name.to_string(),
        })
}
