//! Shumoku CLI library
//!
//! This module contains the core CLI logic for the Shumoku topology renderer.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, OutputFormat};

use std::path::Path;

use log::{error, info, warn};

use shumoku::{ShumokuError, TopologyBuilder};
use shumoku_parser::{HierarchicalGraph, ROOT_SHEET};

/// Run the Shumoku CLI application
///
/// This function reads the input topology and every file it includes,
/// renders the requested sheet(s) and writes the result to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ShumokuError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Included files that failed to load, unless `--force` is set
/// - Unknown sheet ids
pub async fn run(args: &Args) -> Result<(), ShumokuError> {
    let output_path = args.output_path();
    info!(
        input_path = args.input,
        output_path = output_path;
        "Processing topology"
    );

    if args.all_sheets && args.format != OutputFormat::Html {
        return Err(ShumokuError::Config(
            "--all-sheets requires --format html".to_string(),
        ));
    }

    let app_config = config::load_config(args.config.as_ref())?;
    let builder = TopologyBuilder::new(app_config);

    let hierarchy = builder.parse_file(&args.input).await?;
    report_warnings(&hierarchy);

    if hierarchy.has_errors() {
        if !args.force {
            return Err(ShumokuError::Hierarchy(hierarchy.warnings));
        }
        warn!("Rendering an incomplete topology because --force is set");
    }

    let sheet_id = args.sheet.as_deref().unwrap_or(ROOT_SHEET);
    let output = match args.format {
        OutputFormat::Svg => builder.render_sheet_svg(&hierarchy, sheet_id, args.interactive)?,
        OutputFormat::Html => {
            let title = document_title(&hierarchy, &args.input);
            if args.all_sheets {
                builder.render_sheets_html(&hierarchy, &title)?
            } else {
                let svg = builder.render_sheet_svg(&hierarchy, sheet_id, true)?;
                shumoku::export::html::render_html(&svg, &title)
            }
        }
    };

    tokio::fs::write(&output_path, output).await?;

    info!(
        output_file = output_path,
        format = args.format.extension();
        "Topology exported successfully"
    );

    Ok(())
}

fn report_warnings(hierarchy: &HierarchicalGraph) {
    for warning in &hierarchy.warnings {
        let code = warning.code.as_str();
        let file = warning.file.as_deref().unwrap_or("-");
        if warning.is_error() {
            error!(code, file; "{}", warning.message);
        } else {
            warn!(code, file; "{}", warning.message);
        }
    }
}

/// Page title: the document name, or the input file stem.
fn document_title(hierarchy: &HierarchicalGraph, input: &str) -> String {
    hierarchy.graph.name.clone().unwrap_or_else(|| {
        Path::new(input)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Shumoku".to_string())
    })
}
