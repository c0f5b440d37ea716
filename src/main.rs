//! Command-line entry point: renders the built-in themes over a Tabler-style
//! icon directory and exits non-zero if any unit failed.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use iconsmith::theme::builtin_themes;
use iconsmith::{HexColor, PipelineConfig, run};

#[derive(Debug, Parser)]
#[command(name = "iconsmith", about = "Generate themed icon atlases from SVG sources")]
struct Args {
    /// Root folder holding one subdirectory of SVG files per style.
    #[arg(long)]
    icons_dir: PathBuf,

    /// Where to write per-theme outputs and the combined preview.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Icon size in pixels.
    #[arg(long, default_value_t = 16)]
    size: u32,

    /// Pixels of padding between atlas cells.
    #[arg(long, default_value_t = 2)]
    padding: u32,

    /// Used if a kind has no color.
    #[arg(long, default_value = "#231f20")]
    fallback_color: HexColor,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if !args.icons_dir.is_dir() {
        log::error!("icons dir not found: {}", args.icons_dir.display());
        return ExitCode::FAILURE;
    }

    let config = PipelineConfig {
        icons_dir: args.icons_dir,
        out_dir: args.out_dir,
        size_px: args.size,
        padding: args.padding,
        fallback_color: args.fallback_color,
    };

    let summary = match run(&config, &builtin_themes()) {
        Ok(summary) => summary,
        Err(e) => {
            log::error!("pipeline failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    for err in &summary.errors {
        log::error!("{err}");
    }
    log::info!(
        "built {} atlases, {} failures",
        summary.atlases_built,
        summary.errors.len()
    );

    if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
