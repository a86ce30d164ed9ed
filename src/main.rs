use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use media_sampler::{
    run_sampler, AppConfig, ExtensionSet, OutputFormat, SampleReport, SamplerError,
};
use std::path::PathBuf;
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Parse command line arguments
    let matches = build_cli().get_matches();

    // Initialize configuration from command line arguments
    let config = create_app_config(&matches)?;

    // .env may carry RUST_LOG, so load it before the subscriber reads it
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    // Initialize logging
    initialize_logging(&config.log_level)?;
    if !dotenv_loaded {
        debug!("No .env file found, using system environment variables");
    }

    run_application(config)
}

fn build_cli() -> Command {
    Command::new("media-sampler")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Randomly copy media files into a test source folder for QA runs.")
        .arg(
            Arg::new("seed_dir")
                .value_name("SEED_DIR")
                .help("Source directory containing media to sample from")
                .value_parser(clap::value_parser!(PathBuf))
                .required(true),
        )
        .arg(
            Arg::new("test_dir")
                .value_name("TEST_DIR")
                .help("Destination folder for copied media")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("test_source"),
        )
        .arg(
            Arg::new("count")
                .long("count")
                .value_name("N")
                .help("Number of media files to copy")
                .default_value("100"),
        )
        .arg(
            Arg::new("extensions")
                .long("extensions")
                .value_name("EXT")
                .help("File extensions to include (overrides the built-in media list)")
                .num_args(0..)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .help("Seed for the RNG to get reproducible samples")
                .allow_negative_numbers(true),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_name("FORMAT")
                .help("Report format (text, json)")
                .default_value("text"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Set the log level (trace, debug, info, warn, error)")
                .default_value("warn"),
        )
}

/// Pure function to create application configuration from CLI arguments
fn create_app_config(matches: &clap::ArgMatches) -> Result<AppConfig, SamplerError> {
    let defaults = AppConfig::default();

    let seed_dir = matches
        .get_one::<PathBuf>("seed_dir")
        .cloned()
        .unwrap_or(defaults.seed_dir);

    let test_dir = matches
        .get_one::<PathBuf>("test_dir")
        .cloned()
        .unwrap_or(defaults.test_dir);

    let count = match matches.get_one::<String>("count") {
        Some(raw) => raw.parse::<usize>().map_err(|_| {
            SamplerError::InvalidArgument(format!("invalid count value '{}'", raw))
        })?,
        None => defaults.count,
    };

    let extensions: Vec<String> = matches
        .get_many::<String>("extensions")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let seed = matches
        .get_one::<String>("seed")
        .map(|raw| parse_seed(raw))
        .transpose()?;

    let format = match matches.get_one::<String>("format") {
        Some(raw) => raw.parse::<OutputFormat>()?,
        None => defaults.format,
    };

    let log_level = matches
        .get_one::<String>("log-level")
        .cloned()
        .unwrap_or(defaults.log_level);

    Ok(AppConfig {
        seed_dir,
        test_dir,
        count,
        extensions: ExtensionSet::from_user_input_or_default(&extensions),
        seed,
        format,
        log_level,
    })
}

/// Any integer is a valid seed; negatives are reinterpreted as their u64 bits
fn parse_seed(raw: &str) -> Result<u64, SamplerError> {
    raw.parse::<i64>()
        .map(|seed| seed as u64)
        .or_else(|_| raw.parse::<u64>())
        .map_err(|_| SamplerError::InvalidArgument(format!("invalid seed value '{}'", raw)))
}

/// Initialize structured logging with tracing
fn initialize_logging(log_level: &str) -> Result<()> {
    let filter = build_log_filter(log_level, std::env::var(EnvFilter::DEFAULT_ENV).ok());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}

/// RUST_LOG directives win when set and valid; otherwise `--log-level` applies
fn build_log_filter(log_level: &str, env_directives: Option<String>) -> EnvFilter {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    env_directives
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::default().add_directive(level.into()))
}

fn run_application(config: AppConfig) -> Result<()> {
    info!("Starting media sampler");
    debug!("Configuration: {:#?}", config);

    let report = run_sampler(&config)?;

    match config.format {
        OutputFormat::Text => print!("{}", render_text_report(&report)),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    info!("Sampling completed");
    Ok(())
}

fn render_text_report(report: &SampleReport) -> String {
    if report.candidates_found == 0 {
        return "No media files found matching the provided extensions.\n".to_string();
    }

    let mut out = format!(
        "Copied {} files to {}:\n",
        report.copied_count(),
        report.test_dir.display()
    );
    for path in report.destinations() {
        out.push_str(&format!(" - {}\n", path.display()));
    }
    out
}
