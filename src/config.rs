//! Configuration for scale synthesis.
//!
//! A `ScaleOptions` bundle carries everything one plot needs to turn raw
//! data into a color scale and legend. Defaults match the long-standing
//! plotting conventions: vmin 0, vmax at the 95th percentile, and a tiny
//! neutral band (0.01%) to suppress near-zero noise.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{HadleyError, Result};

/// Sentinel neutral level that requests the two-tone grey band on
/// difference scales (light grey below zero, lighter grey above).
pub const TWO_TONE_NEUTRAL: f64 = 0.82;

/// Upper tone paired with [`TWO_TONE_NEUTRAL`]
pub const TWO_TONE_NEUTRAL_HIGH: f64 = 0.88;

/// Options controlling scale resolution, colormap synthesis, and legend
/// tick placement for a single plot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaleOptions {
    /// Scale minimum: a number, or a percentile such as "5%"
    #[serde(default = "default_vmin")]
    pub vmin: String,

    /// Scale maximum: a number, or a percentile such as "95%"
    #[serde(default = "default_vmax")]
    pub vmax: String,

    /// Neutral band extent around zero (or the scale center); "0%" disables
    #[serde(default = "default_neutral")]
    pub neutral: String,

    /// Number of color bins; values below 3 fall back to 256
    #[serde(default)]
    pub bins: Option<u32>,

    /// Explicit number of legend ticks
    #[serde(default)]
    pub ticks: Option<u32>,

    /// Pin the legend to exactly [vmin, vmax] instead of open-ended bins
    #[serde(default)]
    pub bound_scale: bool,

    /// Force a difference colormap even if the data has consistent signs
    #[serde(default)]
    pub force_diff: bool,

    /// Turn off autoscaling and use exactly the entered max and min
    #[serde(default)]
    pub no_auto: bool,

    /// Fill whole color bins with the neutral color rather than overlap
    #[serde(default)]
    pub nfill: bool,

    /// Comma-separated cutoff values creating uneven bins
    #[serde(default)]
    pub cutoffs: Option<String>,

    /// Exclude values below this threshold from the scale statistics
    #[serde(default)]
    pub mask_less: Option<f64>,

    /// Neutral color name: "black", "white", or "grey"
    #[serde(default)]
    pub ncolor: Option<String>,

    /// Base colormap name, or a comma-separated list of colors
    #[serde(default)]
    pub cmap: Option<String>,

    /// Write the resolved scale maximum to this file
    #[serde(default)]
    pub report_max: Option<PathBuf>,
}

impl ScaleOptions {
    /// Load options from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let options: ScaleOptions = serde_json::from_str(&content)?;
        Ok(options)
    }

    /// Validate the option bundle: limit specs must be numbers or
    /// percentages, and the cutoff list must parse.
    pub fn validate(&self) -> Result<()> {
        for (name, spec) in [
            ("vmin", &self.vmin),
            ("vmax", &self.vmax),
            ("neutral", &self.neutral),
        ] {
            if !is_limit_spec(spec) {
                return Err(HadleyError::Config {
                    message: format!(
                        "Invalid {} spec '{}': must be a number or a percentage",
                        name, spec
                    ),
                });
            }
        }

        if let Some(cutoffs) = &self.cutoffs {
            parse_cutoffs(cutoffs)?;
        }

        Ok(())
    }

    /// Resolve the neutral color level for this plot.
    ///
    /// Named colors map to grey levels; an unrecognized name warns and
    /// falls back to grey. When unset, difference scales get the two-tone
    /// sentinel and standard scales get plain grey.
    pub fn neutral_color(&self, is_difference: bool) -> f64 {
        match self.ncolor.as_deref() {
            Some("black") => 0.0,
            Some("white") => 1.0,
            Some("grey") | Some("gray") => 0.85,
            Some(other) => {
                warn!(ncolor = other, "Unknown neutral color, defaulting to grey");
                0.85
            }
            None if is_difference => TWO_TONE_NEUTRAL,
            None => 0.85,
        }
    }
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            vmin: default_vmin(),
            vmax: default_vmax(),
            neutral: default_neutral(),
            bins: None,
            ticks: None,
            bound_scale: false,
            force_diff: false,
            no_auto: false,
            nfill: false,
            cutoffs: None,
            mask_less: None,
            ncolor: None,
            cmap: None,
            report_max: None,
        }
    }
}

/// Parse a comma-separated cutoff list into a sorted list of values
pub fn parse_cutoffs(cutoff_list: &str) -> Result<Vec<f64>> {
    let mut cutoffs = Vec::new();
    for entry in cutoff_list.split(',') {
        let value: f64 = entry
            .trim()
            .parse()
            .map_err(|_| HadleyError::InvalidCutoff {
                value: entry.trim().to_string(),
            })?;
        cutoffs.push(value);
    }
    cutoffs.sort_by(|a, b| a.total_cmp(b));
    Ok(cutoffs)
}

/// Syntactic check that a string is a valid limit spec. Non-finite
/// numbers ("inf", "NaN") are not valid limits.
fn is_limit_spec(spec: &str) -> bool {
    let spec = spec.trim();
    let num = match spec.strip_suffix('%') {
        Some(num) => num.trim(),
        None => spec,
    };
    num.parse::<f64>().map_or(false, |v| v.is_finite())
}

// Default value functions for serde
fn default_vmin() -> String {
    "0".to_string()
}

fn default_vmax() -> String {
    "95%".to_string()
}

fn default_neutral() -> String {
    "0.01%".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ScaleOptions::default();
        assert_eq!(options.vmin, "0");
        assert_eq!(options.vmax, "95%");
        assert_eq!(options.neutral, "0.01%");
        assert!(options.bins.is_none());
        assert!(!options.bound_scale);
    }

    #[test]
    fn test_validate() {
        let options = ScaleOptions::default();
        assert!(options.validate().is_ok());

        let mut options = ScaleOptions::default();
        options.vmax = "lots".to_string();
        assert!(options.validate().is_err());

        let mut options = ScaleOptions::default();
        options.cutoffs = Some("1,two,3".to_string());
        assert!(options.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite_limits() {
        for spec in ["inf", "-inf", "NaN", "NaN%"] {
            let mut options = ScaleOptions::default();
            options.vmax = spec.to_string();
            assert!(options.validate().is_err(), "{}", spec);
        }
    }

    #[test]
    fn test_parse_cutoffs_sorts() {
        let cutoffs = parse_cutoffs("10, -5, 0").unwrap();
        assert_eq!(cutoffs, vec![-5.0, 0.0, 10.0]);
    }

    #[test]
    fn test_parse_cutoffs_invalid() {
        assert!(parse_cutoffs("1,,3").is_err());
        assert!(parse_cutoffs("a,b").is_err());
    }

    #[test]
    fn test_neutral_color_resolution() {
        let mut options = ScaleOptions::default();
        assert_eq!(options.neutral_color(false), 0.85);
        assert_eq!(options.neutral_color(true), TWO_TONE_NEUTRAL);

        options.ncolor = Some("black".to_string());
        assert_eq!(options.neutral_color(true), 0.0);

        options.ncolor = Some("white".to_string());
        assert_eq!(options.neutral_color(false), 1.0);

        // Unknown names default to grey in either mode
        options.ncolor = Some("mauve".to_string());
        assert_eq!(options.neutral_color(true), 0.85);
    }

    #[test]
    fn test_options_from_json() {
        let json = r#"{"vmax": "99%", "bins": 10, "bound_scale": true}"#;
        let options: ScaleOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.vmax, "99%");
        assert_eq!(options.bins, Some(10));
        assert!(options.bound_scale);
        // Unspecified fields keep their defaults
        assert_eq!(options.vmin, "0");
        assert_eq!(options.neutral, "0.01%");
    }
}
