use anyhow::{Context, Result};
use orderbook_signal::{AnalyzerConfig, OrderBookAnalyzer, Snapshot};
use std::io::Read;

/// Parsed command-line options
struct CliOptions {
    input: String,
    config: Option<String>,
    pretty: bool,
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    // Initialize tracing/logging
    // stdout carries the JSON summary, so logs always go to stderr
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = match &options.config {
        Some(path) => AnalyzerConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => AnalyzerConfig::default(),
    };
    let analyzer = OrderBookAnalyzer::new(config).context("Invalid analyzer configuration")?;

    let history = read_history(&options.input)?;
    tracing::info!(
        "Analyzing {} snapshot(s) from {}",
        history.len(),
        options.input
    );

    let output = match analyzer.summary(&history) {
        Some(summary) => {
            tracing::info!(
                "Signal: {} (confidence {}, score {})",
                summary.trading_signal.signal,
                summary.trading_signal.confidence,
                summary.trading_signal.score.score
            );
            serde_json::to_value(&summary)?
        }
        None => {
            tracing::warn!("No snapshots supplied - emitting NO_DATA signal");
            serde_json::to_value(analyzer.analyze(&history))?
        }
    };

    let rendered = if options.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", rendered);

    Ok(())
}

/// Read a JSON array of snapshots from a file, or stdin for `-`
fn read_history(input: &str) -> Result<Vec<Snapshot>> {
    let raw = if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read snapshots from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read snapshots from {}", input))?
    };

    serde_json::from_str(&raw).context("Snapshot history must be a JSON array of snapshots")
}

/// Parse command-line arguments
fn parse_args(args: &[String]) -> CliOptions {
    let mut input = None;
    let mut config = None;
    let mut pretty = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--input" | "-i" => {
                if i + 1 < args.len() {
                    input = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--pretty" => pretty = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    CliOptions {
        input: input.unwrap_or_else(|| "-".to_string()),
        config,
        pretty,
    }
}

/// Print usage information
fn print_usage() {
    println!("orderbook-signal - order book manipulation detection and signal scoring");
    println!();
    println!("USAGE:");
    println!("    orderbook-signal [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --input, -i <PATH>   Snapshot array, oldest first (default: - for stdin)");
    println!("    --config, -c <PATH>  Analyzer configuration JSON (default: built-in thresholds)");
    println!("    --pretty             Pretty-print the JSON summary");
    println!("    --help, -h           Print this help message");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    RUST_LOG             Logging level (default: info)");
    println!();
    println!("EXAMPLES:");
    println!("    # Analyze a recorded history");
    println!("    orderbook-signal --input history.json --pretty");
    println!();
    println!("    # Analyze with lot multiplier 100 (exchange lot = 100 shares)");
    println!("    echo '{{\"unit_multiplier\": 100}}' > config.json");
    println!("    orderbook-signal -i history.json -c config.json");
}
