#![warn(clippy::all)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};
use lazy_static::lazy_static;
use semver::Version;

mod commands;
mod settings;

pub use settings::Settings;

lazy_static! {
    pub static ref VERSION: Version = Version::parse(env!("CARGO_PKG_VERSION")).unwrap();
}

#[derive(Parser, Debug)]
#[command(version, about = "Pixel editor for indexed bitmap font strips (char*.bmp)", long_about = None)]
pub struct Args {
    /// Workspace directory with the char*.bmp strips (default: from settings, else the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    workspace: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List the strips in the workspace
    List {
        /// Directory to scan instead of the workspace
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Show palette, dimensions and glyph layout of a strip
    Info {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Glyph height override
        #[arg(long, value_name = "N")]
        char_height: Option<u32>,
    },

    /// Replay pointer strokes on a strip and save it
    Paint {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Palette index to paint with (default: from settings)
        #[arg(short, long, value_name = "N")]
        color: Option<u8>,

        /// Zoom level the pointer positions refer to (default: from settings)
        #[arg(short, long, value_name = "Z")]
        zoom: Option<i64>,

        /// One stroke as space separated "x,y" points; repeat for more strokes
        #[arg(short, long, value_name = "POINTS", required = true, allow_hyphen_values = true)]
        stroke: Vec<String>,

        /// Points are cell coordinates instead of pointer positions
        #[arg(long, default_value_t = false)]
        cells: bool,

        /// Undo the last stroke before saving
        #[arg(long, default_value_t = false)]
        undo: bool,

        /// Save to this path instead of overwriting FILE
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Check that a strip survives decode and encode unchanged
    Verify {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print glyph rows as text, one character per palette index
    Dump {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Only this glyph
        #[arg(short, long, value_name = "N")]
        glyph: Option<u32>,
    },
}

fn get_log_dir() -> Option<PathBuf> {
    if let Some(dir) = Settings::config_dir() {
        if !dir.exists() {
            std::fs::create_dir_all(&dir).ok()?;
        }
        return Some(dir);
    }
    None
}

fn start_logger() -> Option<LoggerHandle> {
    let Some(log_dir) = get_log_dir() else {
        eprintln!("Failed to create log file");
        return None;
    };
    let result = Logger::try_with_env_or_str("info").and_then(|logger| {
        logger
            .log_to_file(FileSpec::default().directory(&log_dir).basename("bmpfont_draw").suffix("log").suppress_timestamp())
            .rotate(Criterion::Size(64 * 1024), Naming::Numbers, Cleanup::KeepLogFiles(3))
            .create_symlink(log_dir.join("bmpfont_draw.log"))
            .duplicate_to_stderr(flexi_logger::Duplicate::Warn)
            .start()
    });
    match result {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to start logger: {err}");
            None
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let _logger = start_logger();
    log::info!("Starting bmpfont_draw {}", *VERSION);

    let mut settings = Settings::load();
    let loaded = settings.clone();
    let result = commands::run(args, &mut settings);
    if settings != loaded {
        settings.store();
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
