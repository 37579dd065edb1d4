//! Command-line argument definitions for the Shumoku CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the output format,
//! which sheets are rendered, configuration file selection, and logging
//! verbosity.

use clap::{Parser, ValueEnum};

/// Output file format.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Standalone SVG document
    #[default]
    Svg,
    /// HTML page with an inline pan/zoom viewer
    Html,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Html => "html",
        }
    }
}

/// Command-line arguments for the Shumoku topology renderer
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input topology file
    #[arg(help = "Path to the input YAML file")]
    pub input: String,

    /// Path to the output file [default: out.svg or out.html]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,

    /// Render a single sheet (`root`, `dc1`, `site1/dc1`, ...)
    #[arg(long, conflicts_with = "all_sheets")]
    pub sheet: Option<String>,

    /// Render every sheet into one HTML page (requires `--format html`)
    #[arg(long)]
    pub all_sheets: bool,

    /// Emit data-* attributes for device and link details
    #[arg(long)]
    pub interactive: bool,

    /// Render even if included files failed to load
    #[arg(long)]
    pub force: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Output path, defaulting to `out.<format>`.
    pub fn output_path(&self) -> String {
        self.output
            .clone()
            .unwrap_or_else(|| format!("out.{}", self.format.extension()))
    }
}
