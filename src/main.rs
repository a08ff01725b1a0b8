//! CLI entry point for reqdrop

use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, ValueEnum};
use reqdrop::config::DEFAULT_PYTHON;
use reqdrop::drop::INSTALL_INSTRUCTIONS;
use reqdrop::file_utils::{parse_file_size, set_max_file_size};
use reqdrop::writer::{DEFAULT_BASE_NAME, DEFAULT_EXTENSION};
use reqdrop::{Config, DropHandler, DropOutcome, OutputTarget, load_installed};
use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

const PATH_LIST_DELIMITER: char = if cfg!(windows) { ';' } else { ':' };

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
            // https://no-color.org/
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "reqdrop")]
#[command(about = "Drop a Python file to write a requirements.txt for its imports")]
#[command(version)]
struct Args {
    /// Python files to process without opening the window
    #[arg(value_name = "FILE")]
    files: Vec<String>,

    /// Directory that requirements files are written to
    #[arg(short = 'o', long = "output-dir", env = "REQDROP_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Base name of the requirements file
    #[arg(long = "base-name", default_value = DEFAULT_BASE_NAME)]
    base_name: String,

    /// Extension of the requirements file, including the dot
    #[arg(long = "extension", default_value = DEFAULT_EXTENSION)]
    extension: String,

    /// Site-packages directory to read installed packages from (can be used multiple times).
    /// When omitted, the interpreter given by --python is asked for its sys.path
    #[arg(
        long = "site-packages",
        value_name = "DIR",
        env = "REQDROP_SITE_PACKAGES",
        value_delimiter = PATH_LIST_DELIMITER
    )]
    site_packages: Vec<PathBuf>,

    /// Python interpreter used to discover installed packages
    #[arg(long = "python", value_name = "EXE", env = "REQDROP_PYTHON", default_value = DEFAULT_PYTHON)]
    python: String,

    /// Leave standard library modules out of the requirements file
    #[arg(long = "exclude-stdlib")]
    exclude_stdlib: bool,

    /// Maximum source file size to parse (default: no limit).
    /// Use suffixes: K, M, G (e.g., 5M for 5MB)
    #[arg(long = "max-file-size", value_name = "SIZE")]
    max_file_size: Option<String>,

    /// Print installation instructions for a requirements file and exit
    #[arg(long = "instructions")]
    instructions: bool,

    /// Print a JSON report instead of status lines (with FILE arguments)
    #[arg(long = "json")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            output: OutputTarget {
                dir: self.output_dir.clone(),
                base_name: self.base_name.clone(),
                extension: self.extension.clone(),
            },
            site_packages: self.site_packages.clone(),
            python: self.python.clone(),
            exclude_stdlib: self.exclude_stdlib,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(format!("reqdrop={level}"))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[derive(Serialize)]
struct FileReport<'a> {
    file: &'a str,
    #[serde(flatten)]
    outcome: &'a DropOutcome,
    message: String,
}

fn print_reports(files: &[String], outcomes: &[DropOutcome], json: bool, color: bool) -> std::io::Result<()> {
    if json {
        let reports: Vec<FileReport<'_>> = files
            .iter()
            .zip(outcomes)
            .map(|(file, outcome)| FileReport {
                file,
                outcome,
                message: outcome.message(),
            })
            .collect();
        let rendered = serde_json::to_string_pretty(&reports).map_err(std::io::Error::other)?;
        println!("{}", rendered);
        return Ok(());
    }

    let choice = if color {
        ColorChoice::Always
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    for outcome in outcomes {
        let fg = if outcome.is_written() {
            Color::Green
        } else {
            Color::Red
        };
        stdout.set_color(ColorSpec::new().set_fg(Some(fg)))?;
        write!(stdout, "{}", outcome.message())?;
        stdout.reset()?;
        writeln!(stdout)?;
    }
    Ok(())
}

fn run_headless(handler: &DropHandler, args: &Args) -> i32 {
    let outcomes: Vec<DropOutcome> = args.files.iter().map(|file| handler.handle(file)).collect();

    if let Err(e) = print_reports(&args.files, &outcomes, args.json, should_use_color(args.color)) {
        eprintln!("reqdrop: error writing output: {}", e);
        return 1;
    }

    if outcomes.iter().all(DropOutcome::is_written) {
        0
    } else {
        1
    }
}

#[cfg(feature = "gui")]
fn run_window(handler: DropHandler) -> i32 {
    match reqdrop::gui::run(handler) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("reqdrop: {}", e);
            1
        }
    }
}

#[cfg(not(feature = "gui"))]
fn run_window(_handler: DropHandler) -> i32 {
    eprintln!("reqdrop: built without window support; pass FILE arguments to process files");
    2
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.instructions {
        print!("{}", INSTALL_INSTRUCTIONS);
        return;
    }

    if let Some(ref size_str) = args.max_file_size {
        match parse_file_size(size_str) {
            Ok(size) => set_max_file_size(size),
            Err(e) => {
                eprintln!("reqdrop: invalid --max-file-size '{}': {}", size_str, e);
                process::exit(1);
            }
        }
    }

    let config = args.config();
    let installed = load_installed(&config);
    let handler = DropHandler::new(config, installed);

    let code = if args.files.is_empty() {
        run_window(handler)
    } else {
        run_headless(&handler, &args)
    };
    process::exit(code);
}
