use std::{fs, path::PathBuf};

use tempfile::tempdir;

use shumoku::ShumokuError;
use shumoku_cli::{Args, OutputFormat, run};

/// Demos live at the workspace root, not in the crate
fn demos_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos")
}

/// Collects all .yaml files from a directory
fn collect_yaml_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("yaml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args(input: &PathBuf, output: &PathBuf, format: OutputFormat) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: Some(output.to_string_lossy().to_string()),
        format,
        sheet: None,
        all_sheets: false,
        interactive: false,
        force: false,
        config: None,
        log_level: "off".to_string(),
    }
}

#[tokio::test]
async fn e2e_smoke_test_valid_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_demos = collect_yaml_files(demos_path());
    assert!(!valid_demos.is_empty(), "No valid demos found in demos/");

    let mut failed_demos = Vec::new();

    for demo_path in &valid_demos {
        let stem = demo_path.file_stem().unwrap().to_string_lossy().to_string();
        for format in [OutputFormat::Svg, OutputFormat::Html] {
            let output_path = temp_dir
                .path()
                .join(format!("{stem}.{}", format.extension()));

            if let Err(e) = run(&args(demo_path, &output_path, format)).await {
                failed_demos.push((demo_path.clone(), e));
                continue;
            }

            let written = fs::read_to_string(&output_path).expect("Output file was not written");
            assert!(written.contains("<svg"), "{} has no svg", output_path.display());
        }
    }

    if !failed_demos.is_empty() {
        eprintln!("\nValid demos that failed:");
        for (path, err) in &failed_demos {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} valid demo(s) failed unexpectedly", failed_demos.len());
    }
}

#[tokio::test]
async fn e2e_smoke_test_error_demos() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_demos = collect_yaml_files(demos_path().join("errors"));
    assert!(!error_demos.is_empty(), "No error demos found in demos/errors/");

    let mut unexpected_successes = Vec::new();

    for demo_path in &error_demos {
        let output_path = temp_dir.path().join(format!(
            "{}.svg",
            demo_path.file_stem().unwrap().to_string_lossy()
        ));

        if run(&args(demo_path, &output_path, OutputFormat::Svg))
            .await
            .is_ok()
        {
            unexpected_successes.push(demo_path.clone());
        }
    }

    if !unexpected_successes.is_empty() {
        eprintln!("\nError demos that unexpectedly succeeded:");
        for path in &unexpected_successes {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error demo(s) succeeded unexpectedly",
            unexpected_successes.len()
        );
    }
}

#[tokio::test]
async fn e2e_force_renders_incomplete_hierarchy() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_path().join("errors").join("missing_include.yaml");
    let output = temp_dir.path().join("forced.svg");

    let err = run(&args(&input, &output, OutputFormat::Svg))
        .await
        .unwrap_err();
    assert!(matches!(err, ShumokuError::Hierarchy(_)), "{err}");
    assert!(!output.exists());

    let mut forced = args(&input, &output, OutputFormat::Svg);
    forced.force = true;
    run(&forced).await.expect("--force should render");

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains(r#"data-id="core""#));
}

#[tokio::test]
async fn e2e_renders_child_sheet_and_all_sheets() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_path().join("campus.yaml");

    let sheet_output = temp_dir.path().join("dc1.svg");
    let mut sheet_args = args(&input, &sheet_output, OutputFormat::Svg);
    sheet_args.sheet = Some("dc1".to_string());
    sheet_args.interactive = true;
    run(&sheet_args).await.expect("Failed to render dc1 sheet");
    let svg = fs::read_to_string(&sheet_output).unwrap();
    assert!(svg.contains(r#"data-sheet-id="dc1""#));
    assert!(svg.contains(r#"data-id="core-a""#));

    let page_output = temp_dir.path().join("campus.html");
    let mut page_args = args(&input, &page_output, OutputFormat::Html);
    page_args.all_sheets = true;
    run(&page_args).await.expect("Failed to render all sheets");
    let html = fs::read_to_string(&page_output).unwrap();
    assert!(html.contains("<title>Campus Network</title>"));
    assert!(html.contains(r#"data-sheet-id="office""#));
}

#[tokio::test]
async fn e2e_rejects_unknown_sheet_and_svg_all_sheets() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let input = demos_path().join("simple.yaml");
    let output = temp_dir.path().join("out.svg");

    let mut unknown = args(&input, &output, OutputFormat::Svg);
    unknown.sheet = Some("nope".to_string());
    let err = run(&unknown).await.unwrap_err();
    assert!(matches!(err, ShumokuError::UnknownSheet(id) if id == "nope"));

    let mut all_svg = args(&input, &output, OutputFormat::Svg);
    all_svg.all_sheets = true;
    let err = run(&all_svg).await.unwrap_err();
    assert!(matches!(err, ShumokuError::Config(_)));
}
