//! Command-line interface for yolk_scan
//!
//! Grades the yolk in a photo, either at a picked point or by automatic
//! detection, and prints the report as JSON.

use std::{
    env,
    path::{Path, PathBuf},
    process,
};

use tracing_subscriber::EnvFilter;
use yolk_scan::{image_loader::load_image, AnalyzerConfig, ShadeReport, YolkAnalyzer};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let mut config_path = None;
    let mut point = None;
    let mut print_config = false;
    let mut image_path_arg = None;

    // Parse arguments
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                let Some(path) = args.get(i + 1) else {
                    eprintln!("Error: --config requires a file path");
                    process::exit(1);
                };
                config_path = Some(PathBuf::from(path));
                i += 1;
            }
            "--point" => {
                let coords = args
                    .get(i + 1)
                    .zip(args.get(i + 2))
                    .and_then(|(x, y)| Some((x.parse::<i64>().ok()?, y.parse::<i64>().ok()?)));
                match coords {
                    Some(xy) => point = Some(xy),
                    None => {
                        eprintln!("Error: --point requires two integer coordinates");
                        process::exit(1);
                    }
                }
                i += 2;
            }
            "--print-config" => print_config = true,
            "--help" | "-h" => {
                print_help(&args[0]);
                process::exit(0);
            }
            arg if !arg.starts_with("--") => {
                if image_path_arg.is_none() {
                    image_path_arg = Some(arg.to_string());
                } else {
                    eprintln!("Error: Multiple image paths provided");
                    process::exit(1);
                }
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                eprintln!("Use --help for usage information");
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => match AnalyzerConfig::from_json_file(&path) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("Configuration failed: {}", error);
                eprintln!("{}", error.user_message());
                process::exit(1);
            }
        },
        None => AnalyzerConfig::default(),
    };

    if print_config {
        match config.to_json_string() {
            Ok(json) => println!("{}", json),
            Err(error) => {
                eprintln!("Error serializing configuration: {}", error);
                process::exit(1);
            }
        }
        process::exit(0);
    }

    let analyzer = match YolkAnalyzer::from_config(&config) {
        Ok(analyzer) => analyzer,
        Err(error) => {
            eprintln!("Configuration failed: {}", error);
            eprintln!("{}", error.user_message());
            process::exit(1);
        }
    };

    let image_path_str = match image_path_arg {
        Some(path) => path,
        None => {
            print_help(&args[0]);
            process::exit(1);
        }
    };

    let image_path = Path::new(&image_path_str);

    if !image_path.exists() {
        eprintln!("Error: File '{}' does not exist", image_path.display());
        process::exit(1);
    }

    let result = load_image(image_path).and_then(|image| match point {
        Some((x, y)) => analyzer.report_point(&image, x, y),
        None => analyzer.report_auto(&image),
    });

    match result {
        Ok(report) => print_report(&report),
        Err(error) => {
            eprintln!("Analysis failed: {}", error);
            if error.is_recoverable() {
                eprintln!("Suggestion: {}", error.user_message());
            }
            process::exit(1);
        }
    }
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] <image_path>", program_name);
    eprintln!();
    eprintln!("Grade egg yolk color against the Roche YolkFan scale.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config FILE    Load thresholds and reference scale from a JSON file");
    eprintln!("  --point X Y      Classify the pixel at (X, Y) instead of auto-detecting");
    eprintln!("  --print-config   Print the active configuration as JSON and exit");
    eprintln!("  --help, -h       Show this help message");
    eprintln!();
    eprintln!("Set RUST_LOG=debug to trace the detection stages.");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  {} yolk.jpg", program_name);
    eprintln!("  {} --point 320 240 yolk.jpg", program_name);
    eprintln!("  {} --config farm.json yolk.png", program_name);
}

fn print_report(report: &ShadeReport) {
    // Print JSON to stdout for programmatic use
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing result: {}", e),
    }

    // Print summary to stderr for human reading
    let [r, g, b] = report.rgb;
    eprintln!();
    eprintln!("Yolk Color Summary:");
    eprintln!("  Sample RGB: ({}, {}, {})", r, g, b);
    eprintln!(
        "  Lab Values: L*={:.1}, a*={:.1}, b*={:.1}",
        report.lab.l, report.lab.a, report.lab.b
    );
    eprintln!("  Yolk Fan Level: {} ({})", report.shade, report.shade_hex);
    eprintln!("  Delta E: {:.2}", report.delta_e);

    if let Some(detection) = &report.detection {
        eprintln!(
            "  Auto-detected at ({}, {}), area {} px",
            detection.centroid.0, detection.centroid.1, detection.area
        );
    }
}
