//! preview_scale - inspect a synthesized color scale from the terminal.
//!
//! Reads whitespace-separated numeric values from stdin, builds the color
//! scale and legend with the given options, and prints the tick table plus
//! a row of sampled swatches as hex codes. Useful for checking what a
//! plot's legend will look like before rendering anything.
//!
//! Usage: preview_scale [OPTIONS] < values.txt

use clap::Parser;
use ndarray::Array1;
use std::io::Read;

use hadley::colormaps::ColorFunction;
use hadley::{
    build_scale, init_tracing, log_error, log_timed_operation, ColormapRegistry, HadleyError,
    Result, ScaleOptions,
};

/// Command-line arguments for preview_scale
#[derive(Parser, Debug)]
#[command(name = "preview_scale")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scale minimum: a number, or a percentile such as "5%"
    #[arg(long, default_value = "0")]
    vmin: String,

    /// Scale maximum: a number, or a percentile such as "95%"
    #[arg(long, default_value = "95%")]
    vmax: String,

    /// Neutral band extent; "0%" disables
    #[arg(short = 'g', long, default_value = "0.01%")]
    neutral: String,

    /// Number of color bins (must be greater than 2)
    #[arg(short, long)]
    bins: Option<u32>,

    /// Number of legend ticks
    #[arg(long)]
    ticks: Option<u32>,

    /// Bound the scale to exactly [vmin, vmax]
    #[arg(long)]
    bound_scale: bool,

    /// Force a difference colormap even for single-signed data
    #[arg(long)]
    force_diff: bool,

    /// Turn off autoscaling and use exactly the entered max and min
    #[arg(long)]
    no_auto: bool,

    /// Fill whole color bins with the neutral color
    #[arg(long)]
    nfill: bool,

    /// Comma-separated cutoff values creating uneven bins
    #[arg(long)]
    cutoffs: Option<String>,

    /// Exclude values below this threshold from the scale statistics
    #[arg(long)]
    mask_less: Option<f64>,

    /// Neutral color: white, grey, or black
    #[arg(long)]
    ncolor: Option<String>,

    /// Base colormap name, or a comma-separated color list
    #[arg(long)]
    cmap: Option<String>,

    /// Write the resolved scale maximum to this file
    #[arg(long)]
    report_max: Option<std::path::PathBuf>,

    /// Number of swatches to print
    #[arg(long, default_value = "16")]
    swatches: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "HADLEY_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

impl Args {
    fn into_options(self) -> ScaleOptions {
        ScaleOptions {
            vmin: self.vmin,
            vmax: self.vmax,
            neutral: self.neutral,
            bins: self.bins,
            ticks: self.ticks,
            bound_scale: self.bound_scale,
            force_diff: self.force_diff,
            no_auto: self.no_auto,
            nfill: self.nfill,
            cutoffs: self.cutoffs,
            mask_less: self.mask_less,
            ncolor: self.ncolor,
            cmap: self.cmap,
            report_max: self.report_max,
        }
    }
}

fn read_values() -> Result<Array1<f64>> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    let values: Vec<f64> = input
        .split_whitespace()
        .map(|token| {
            token.parse::<f64>().map_err(|_| HadleyError::Config {
                message: format!("Invalid data value: {}", token),
            })
        })
        .collect::<Result<_>>()?;

    if values.is_empty() {
        return Err(HadleyError::EmptyData {
            message: "no values on stdin".to_string(),
        });
    }
    Ok(Array1::from(values))
}

fn hex_swatch(rgb: [f64; 3]) -> String {
    format!(
        "#{:02x}{:02x}{:02x}",
        (rgb[0] * 255.0).round() as u8,
        (rgb[1] * 255.0).round() as u8,
        (rgb[2] * 255.0).round() as u8
    )
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let swatches = args.swatches.max(2);
    let options = args.into_options();
    let data = read_values().map_err(|e| {
        log_error(&e, "reading data values from stdin");
        e
    })?;

    let registry = ColormapRegistry::with_builtins();
    let result = log_timed_operation("build_scale", || {
        build_scale(data.view().into_dyn(), &options, &registry)
    })
    .map_err(|e| {
        log_error(&e, "scale synthesis");
        e
    })?;

    println!(
        "scale: {} [{} .. {}]",
        if result.is_difference {
            "difference"
        } else {
            "standard"
        },
        result.vmin(),
        result.vmax()
    );

    println!("ticks:");
    for (value, label) in result
        .ticks
        .values()
        .iter()
        .zip(result.ticks.labels().iter())
    {
        println!("  {:>14.6}  {}", value, label);
    }

    let colors: Vec<String> = (0..swatches)
        .map(|i| hex_swatch(result.colormap.sample(i as f64 / (swatches - 1) as f64)))
        .collect();
    println!("colors: {}", colors.join(" "));

    Ok(())
}
