//! Scale limit resolution.
//!
//! A limit spec is either a literal number (`"2.5"`, `"-10"`) or a
//! percentile of the data (`"95%"`). Resolved limits capture the data's
//! min/max and keep a handle on the sorted values so that the scale
//! classifier can re-derive percentile-based limits during difference-mode
//! rebalancing without rescanning the full array.

use ndarray::ArrayViewD;

use crate::error::{HadleyError, Result};

/// One-pass summary statistics of a data array.
///
/// Non-finite values are skipped, and values below the optional mask
/// threshold are excluded before any percentile is taken.
#[derive(Debug, Clone)]
pub struct DataStats {
    sorted: Vec<f64>,
    min: f64,
    max: f64,
}

impl DataStats {
    /// Summarize a data array of any dimensionality.
    pub fn from_array(data: ArrayViewD<'_, f64>, mask_less: Option<f64>) -> Result<Self> {
        let mut values: Vec<f64> = data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .filter(|v| mask_less.map_or(true, |m| *v >= m))
            .collect();

        if values.is_empty() {
            return Err(HadleyError::EmptyData {
                message: "no finite values remain after masking".to_string(),
            });
        }

        values.sort_by(|a, b| a.total_cmp(b));
        let min = values[0];
        let max = values[values.len() - 1];

        Ok(Self {
            sorted: values,
            min,
            max,
        })
    }

    /// Minimum of the (masked) data
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Maximum of the (masked) data
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Number of values that survived masking
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// True when no values survived masking (never the case for a
    /// successfully constructed summary)
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// The p-th percentile using the linear-interpolation definition.
    ///
    /// Percentiles outside [0, 100] are clamped into range.
    pub fn percentile(&self, p: f64) -> f64 {
        let p = p.clamp(0.0, 100.0);
        let n = self.sorted.len();
        if n == 1 {
            return self.sorted[0];
        }
        let rank = p / 100.0 * (n - 1) as f64;
        let lo = rank.floor() as usize;
        let hi = rank.ceil() as usize;
        let frac = rank - lo as f64;
        self.sorted[lo] + (self.sorted[hi] - self.sorted[lo]) * frac
    }
}

/// One resolved scale bound (vmin, vmax, or neutral).
#[derive(Debug, Clone)]
pub struct Limit {
    raw: String,
    percentile: Option<f64>,
    value: f64,
    data_min: f64,
    data_max: f64,
}

impl Limit {
    /// Resolve a limit spec against the data summary.
    ///
    /// A trailing `%` marks a percentile spec; a percentile of zero or less
    /// resolves to 0. Anything else must parse as a finite float; "inf" and
    /// "NaN" parse as f64 but are rejected here.
    pub fn resolve(spec: &str, stats: &DataStats) -> Result<Self> {
        let spec = spec.trim();
        if let Some(num) = spec.strip_suffix('%') {
            let p: f64 = num
                .trim()
                .parse()
                .ok()
                .filter(|p: &f64| p.is_finite())
                .ok_or_else(|| HadleyError::InvalidLimit {
                    spec: spec.to_string(),
                    message: "percentile is not a finite number".to_string(),
                })?;
            Ok(Self::from_percentile(p, stats))
        } else {
            let value: f64 = spec
                .parse()
                .ok()
                .filter(|v: &f64| v.is_finite())
                .ok_or_else(|| HadleyError::InvalidLimit {
                    spec: spec.to_string(),
                    message: "check vmax and vmin values".to_string(),
                })?;
            Ok(Self::absolute(value, stats))
        }
    }

    /// Build a percentile-based limit directly, bypassing the string grammar.
    /// Used by the classifier when deriving complement limits.
    pub fn from_percentile(p: f64, stats: &DataStats) -> Self {
        let value = if p > 0.0 { stats.percentile(p) } else { 0.0 };
        Self {
            raw: format!("{}%", p),
            percentile: Some(p),
            value,
            data_min: stats.min(),
            data_max: stats.max(),
        }
    }

    /// Build an absolute-value limit.
    pub fn absolute(value: f64, stats: &DataStats) -> Self {
        Self {
            raw: value.to_string(),
            percentile: None,
            value,
            data_min: stats.min(),
            data_max: stats.max(),
        }
    }

    /// A copy of this limit with the resolved value overridden.
    /// The percentile metadata is kept so later passes can still tell how
    /// the bound was originally specified.
    pub fn with_value(&self, value: f64) -> Self {
        Self {
            value,
            ..self.clone()
        }
    }

    /// The original spec string
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// True when this limit was specified as a percentile
    pub fn is_percentile(&self) -> bool {
        self.percentile.is_some()
    }

    /// The percentile, when percentile-based
    pub fn percentile(&self) -> Option<f64> {
        self.percentile
    }

    /// The resolved numeric value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Data minimum captured at resolution time
    pub fn data_min(&self) -> f64 {
        self.data_min
    }

    /// Data maximum captured at resolution time
    pub fn data_max(&self) -> f64 {
        self.data_max
    }
}
