use clap::{Parser, Subcommand};
use env_logger::{Builder, Target};
use log::{LevelFilter, error, warn};
use metainfo::analyze::{Analysis, Analyzer, BatchEvent};
use metainfo::config::{self, AnalysisConfig, CONFIG_FILE_NAME, ConfigError, OutputFormat};
use metainfo::output;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "metainfo")]
#[command(about = "Extract EXIF, GPS and PDF metadata into readable reports")]
#[command(long_about = "\
Extract EXIF, GPS and PDF metadata into readable reports

Supported files: .jpg .jpeg .png .tiff .bmp .gif .pdf

Reports list basic file facts, camera identity, capture settings, GPS
position with a map link, and every remaining EXIF tag. PDFs show their
page count and document properties. Each report is also saved as a text
file under ./save unless --no-save is given.

Settings can be kept in ./metainfo.toml; run 'metainfo gen-config' to
generate a documented one.")]
#[command(version)]
struct Cli {
    /// Config file (default: ./metainfo.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for saved reports
    #[arg(long, global = true)]
    save_dir: Option<PathBuf>,

    /// Don't save reports
    #[arg(long, global = true)]
    no_save: bool,

    /// Print records as JSON instead of text reports
    #[arg(long, global = true)]
    json: bool,

    /// Don't print reports, only progress and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a single file
    File {
        path: PathBuf,
        /// Save the report to this path instead of the save directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Analyze every supported file in a folder
    Folder {
        dir: PathBuf,
        /// Include subfolders
        #[arg(short, long)]
        recursive: bool,
        /// Ignored in folder mode; reports always go to the save directory
        #[arg(short, long, hide = true)]
        output: Option<PathBuf>,
    },
    /// Print a stock metainfo.toml with all options documented
    GenConfig,
}

fn init_logger(verbose: bool) {
    if std::env::var("RUST_LOG").is_ok() {
        env_logger::init();
        return;
    }
    let crate_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("metainfo", crate_level)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(&cli)?;
    let analyzer = Analyzer::new(&config);

    match &cli.command {
        Command::File { path, output } => {
            let analysis = analyzer.analyze_file(path)?;
            show_analysis(&analysis, &config);
            if let Some(report) = analyzer.save_report(&analysis, path, output.as_deref())? {
                notice(&config, &format!("Results saved to: {}", report.display()));
            }
        }
        Command::Folder {
            dir,
            recursive,
            output,
        } => {
            if let Some(output) = output {
                warn!(
                    "--output {} is ignored in folder mode",
                    output.display()
                );
            }
            let summary = analyzer.analyze_folder(dir, *recursive || config.recursive, |event| {
                handle_batch_event(event, &config)
            })?;
            for line in output::format_batch_summary(&summary) {
                notice(&config, &line);
            }
        }
        Command::GenConfig => {}
    }

    Ok(ExitCode::SUCCESS)
}

/// File settings (explicit `--config`, or `./metainfo.toml` when present)
/// with command-line flags on top.
fn load_config(cli: &Cli) -> Result<AnalysisConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => {
            // An explicit path has to exist.
            std::fs::metadata(path)?;
            config::load_config(path)?
        }
        None => config::load_config(Path::new(CONFIG_FILE_NAME))?,
    };

    if let Some(dir) = &cli.save_dir {
        config.save_dir = dir.display().to_string();
    }
    if cli.no_save {
        config.save = false;
    }
    if cli.json {
        config.format = OutputFormat::Json;
    }
    if cli.quiet {
        config.quiet = true;
    }
    config.validate()?;
    Ok(config)
}

fn show_analysis(analysis: &Analysis, config: &AnalysisConfig) {
    if config.quiet {
        return;
    }
    match config.format {
        OutputFormat::Text => output::print_lines(&analysis.lines),
        OutputFormat::Json => match output::format_record_json(&analysis.record) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("JSON serialization failed: {}", e),
        },
    }
}

/// Status lines go to stdout for text output and to stderr when stdout
/// carries JSON.
fn notice(config: &AnalysisConfig, line: &str) {
    match config.format {
        OutputFormat::Text => println!("{}", line),
        OutputFormat::Json => eprintln!("{}", line),
    }
}

fn handle_batch_event(event: &BatchEvent, config: &AnalysisConfig) {
    match event {
        BatchEvent::Analyzed { analysis, .. } => show_analysis(analysis, config),
        BatchEvent::Failed { .. } => {
            for line in output::format_batch_event(event) {
                eprintln!("{}", line);
            }
        }
        _ => {
            for line in output::format_batch_event(event) {
                notice(config, &line);
            }
        }
    }
}
