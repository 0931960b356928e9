//! CLI Adapter.

mod render;

use std::io;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use tracing::level_filters::LevelFilter;

use crate::adapters::logging::{self, LoggerConfig, parse_level};
use crate::adapters::ManifestUnitProvider;
use crate::app::commands::{self, RunRequest};
use crate::domain::configuration::{DEFAULT_CONFIG_FILE, load_document_or_default};
use crate::domain::{AppError, RunOptions};

pub use render::{render_catalog, render_detail, render_report};

/// Exit code when at least one feature failed.
pub const EXIT_FEATURE_FAILURE: i32 = 1;
/// Exit code for structural errors.
pub const EXIT_STRUCTURAL_ERROR: i32 = 2;

#[derive(Parser)]
#[command(name = "vmprep")]
#[command(version)]
#[command(
    about = "Prepare a freshly provisioned Windows VM by running self-describing feature units",
    long_about = None,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,

    #[command(flatten)]
    logging: LoggingArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the stock feature manifests and a settings template
    #[clap(visible_alias = "i")]
    Init {
        /// Target directory (defaults to current directory)
        dir: Option<PathBuf>,
    },
    /// Show one feature's metadata and effective configuration
    Show {
        /// Feature id
        id: String,
        #[arg(short = 'd', long, default_value = "features")]
        features_dir: PathBuf,
        #[arg(short = 'c', long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Directory containing feature manifests
    #[arg(short = 'd', long, default_value = "features")]
    features_dir: PathBuf,
    /// Settings document (TOML, or YAML by extension)
    #[arg(short = 'c', long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Run only these features (comma separated or repeated)
    #[arg(short = 'i', long, value_delimiter = ',')]
    include: Vec<String>,
    /// Skip these features
    #[arg(short = 'x', long, value_delimiter = ',')]
    exclude: Vec<String>,
    /// Print the feature catalog and exit
    #[arg(short = 'l', long)]
    list: bool,
    /// Report what would run without invoking any feature logic
    #[arg(short = 'n', long)]
    dry_run: bool,
    /// Keep going after a feature fails
    #[arg(long, default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    continue_on_error: bool,
    /// Mark features whose dependencies did not succeed as not run
    #[arg(long)]
    enforce_dependencies: bool,
    /// Print the catalog or report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct LoggingArgs {
    /// Append log lines to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
    /// error, warn, info, debug, or trace
    #[arg(long, value_name = "LEVEL", value_parser = parse_level)]
    log_level: Option<LevelFilter>,
    /// Omit timestamps from log lines
    #[arg(long)]
    no_timestamps: bool,
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    let result: Result<i32, AppError> = match cli.command {
        Some(Commands::Init { dir }) => run_init(dir).map(|_| 0),
        Some(Commands::Show { id, features_dir, config, json }) => {
            run_show(&id, &features_dir, &config, json).map(|_| 0)
        }
        None => run_features(cli.run, cli.logging),
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_STRUCTURAL_ERROR);
        }
    }
}

fn run_features(args: RunArgs, logging_args: LoggingArgs) -> Result<i32, AppError> {
    let loaded = load_document_or_default(&args.config);
    let logger_config = LoggerConfig::from_document(&loaded.document).with_overrides(
        logging_args.log_file,
        logging_args.log_level,
        logging_args.no_timestamps,
    );
    let _logger = logging::init(&logger_config)?;
    loaded.log_outcome();

    if args.list {
        let catalog = commands::list::execute(&args.features_dir)?;
        if args.json {
            println!("{}", to_json(&catalog)?);
        } else {
            print!("{}", render_catalog(&catalog, &args.features_dir));
        }
        return Ok(0);
    }

    let request = RunRequest {
        features_dir: args.features_dir,
        include: args.include,
        exclude: args.exclude,
        options: RunOptions {
            dry_run: args.dry_run,
            continue_on_error: args.continue_on_error,
            enforce_dependencies: args.enforce_dependencies,
        },
    };

    let report = commands::run::execute(&request, &loaded.document, &ManifestUnitProvider)?;
    if args.json {
        println!("{}", to_json(&report)?);
    } else {
        print!("{}", render_report(&report, request.options.dry_run));
    }

    Ok(if report.has_failures() { EXIT_FEATURE_FAILURE } else { 0 })
}

fn run_init(dir: Option<PathBuf>) -> Result<(), AppError> {
    let _logger = logging::init(&LoggerConfig::default())?;
    let target = dir.unwrap_or_else(|| PathBuf::from("."));

    let written = commands::init::execute(&target)?;
    println!("✅ Initialized vmprep scaffold in {}", target.display());
    for path in &written {
        println!("  {}", path.display());
    }
    println!("Place the scripts referenced by the manifests under features/scripts/.");
    Ok(())
}

fn run_show(id: &str, features_dir: &Path, config: &Path, json: bool) -> Result<(), AppError> {
    let loaded = load_document_or_default(config);
    let _logger = logging::init(&LoggerConfig::from_document(&loaded.document))?;
    loaded.log_outcome();

    let detail = commands::show::execute(features_dir, &loaded.document, id, &ManifestUnitProvider)?;
    if json {
        println!("{}", to_json(&detail)?);
    } else {
        print!("{}", render_detail(&detail));
    }
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    Ok(serde_json::to_string_pretty(value).map_err(io::Error::from)?)
}
