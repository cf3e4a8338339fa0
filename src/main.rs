//! CLI entry point for s3tree

use std::io::{self, IsTerminal, Write};
use std::process;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use s3tree::aws::{self, DEFAULT_PROFILE, SessionConfig};
use s3tree::logging::{LogLevel, init_logging};
use s3tree::output::{ABORT_MESSAGE, CONFIRM_QUESTION, write_cost_warning, write_metrics};
use s3tree::prompt::confirm;
use s3tree::{
    BucketMetrics, EntryFilter, Error, OutputConfig, StreamingFormatter, TreeBuilder, TreeWalker,
    WalkerConfig, collect_metrics, print_json,
};
use termcolor::StandardStream;

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "s3tree")]
#[command(about = "S3 objects tree output")]
#[command(version)]
struct Args {
    /// AWS cli profile name set in ~/.aws/config file
    #[arg(short = 'c', long = "cli-profile", default_value = DEFAULT_PROFILE)]
    cli_profile: String,

    /// S3 bucket name
    #[arg(short = 'b', long = "bucket-name")]
    bucket_name: String,

    /// S3 prefix where the tree will begin
    #[arg(short = 'p', long = "prefix", default_value = "")]
    prefix: String,

    /// Character that separates key segments
    #[arg(long = "delimiter", default_value = "/")]
    delimiter: char,

    /// AWS region (defaults to the profile's region, then ap-southeast-2)
    #[arg(long = "region")]
    region: Option<String>,

    /// Custom S3/CloudWatch endpoint URL (e.g. LocalStack)
    #[arg(long = "endpoint-url")]
    endpoint_url: Option<String>,

    /// Descend only N levels deep (N >= 1)
    #[arg(short = 'L', long = "level", value_parser = parse_level)]
    level: Option<usize>,

    /// List prefixes only
    #[arg(short = 'd', long = "dirs-only")]
    dirs_only: bool,

    /// Ignore entries whose name matches pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore")]
    ignore: Vec<String>,

    /// Do not ask for confirmation before listing
    #[arg(short = 'y', long = "yes")]
    yes: bool,

    /// Output in JSON format
    #[arg(long = "json")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Lookback window for bucket metrics (e.g. 2d, 36h)
    #[arg(long = "metric-window", value_name = "DURATION", default_value = "2d")]
    metric_window: String,

    /// Diagnostic log level (logs go to stderr)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    log_level: LogLevel,
}

/// Parse a `--level` depth; 0 would show nothing below the root line.
fn parse_level(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("level must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// Parse a duration string like "36h" or "2d".
fn parse_duration_string(s: &str) -> Result<Duration, String> {
    humantime::parse_duration(s.trim()).map_err(|e| e.to_string())
}

fn main() {
    let args = Args::parse();
    init_logging(args.log_level);

    match run(&args) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("s3tree: {}", e);
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let metric_window = parse_duration_string(&args.metric_window)
        .map_err(|e| Error::Config(format!("--metric-window '{}': {}", args.metric_window, e)))?;

    // Bad patterns fail before any network call
    EntryFilter::new(args.dirs_only, &args.ignore)?;

    let walker_config = WalkerConfig {
        delimiter: args.delimiter,
        max_depth: args.level,
        dirs_only: args.dirs_only,
        ignore_patterns: args.ignore.clone(),
    };
    let output_config = OutputConfig {
        use_color: !args.json && should_use_color(args.color),
    };

    let mut session_config =
        SessionConfig::new(&args.cli_profile).with_metric_window(metric_window);
    if let Some(region) = &args.region {
        session_config = session_config.with_region(region);
    }
    if let Some(endpoint) = &args.endpoint_url {
        session_config = session_config.with_endpoint(endpoint);
    }

    let session = aws::connect(&session_config)?;
    let walker = TreeWalker::new(&session, walker_config)?;
    let metrics = collect_metrics(&session, &args.bucket_name);

    // In JSON mode stdout carries only the document
    let choice = output_config.color_choice();
    let mut console = if args.json {
        StandardStream::stderr(choice)
    } else {
        StandardStream::stdout(choice)
    };

    if !args.json {
        write_metrics(&mut console, &args.bucket_name, &metrics)?;
    }

    if !args.yes {
        write_cost_warning(&mut console)?;
        let proceed = confirm(&mut io::stdin().lock(), &mut console, CONFIRM_QUESTION, true)?;
        if !proceed {
            writeln!(console, "{}", ABORT_MESSAGE)?;
            return Ok(());
        }
    }

    if args.json {
        print_tree_json(&walker, args, metrics)
    } else {
        writeln!(console)?;
        console.flush()?;
        let mut formatter = StreamingFormatter::new(output_config);
        walker.walk(&args.bucket_name, &args.prefix, &mut formatter)?;
        Ok(())
    }
}

/// Materialize the whole tree, then print it with the metrics as one JSON document.
fn print_tree_json(
    walker: &TreeWalker<'_, aws::AwsSession>,
    args: &Args,
    metrics: BucketMetrics,
) -> Result<(), Error> {
    let mut builder = TreeBuilder::new();
    walker.walk(&args.bucket_name, &args.prefix, &mut builder)?;
    let tree = builder.into_tree(Some(metrics));
    print_json(&tree)?;
    Ok(())
}
