extern crate agiview;

use std::path::{Path, PathBuf};

use agiview::agigfx::export::{self, ExportOptions, OutputFormat};
use anyhow::Result;
use clap::Parser;

/// Converts Sierra Adventure Game Interpreter (AGI) VIEW resources to images
#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
    /// Output image format
    #[clap(short, long, value_enum, default_value_t=OutputFormat::Bmp)]
    format: OutputFormat,
    /// Write images to this directory instead of next to each view
    #[clap(short, long)]
    out_dir: Option<PathBuf>,
    #[clap(short, long, default_value_t=false)]
    /// Only list loops and cels, do not write images
    list: bool,
    /// View resources to convert
    views: Vec<PathBuf>,
}

fn list(view_path: &Path) -> Result<()> {
    let (view, _) = export::load_view(view_path)?;
    println!("{}:", view_path.display());
    print!("{}", export::describe(&view));
    Ok(())
}

fn convert(view_path: &Path, options: &ExportOptions) -> Result<()> {
    print!("Converting {}... ", view_path.display());
    let out_path = export::convert_file(view_path, options)?;
    println!("saved {}", out_path.display());
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    println!("agiview2bmp");
    println!("Convert Sierra Adventure Game Interpreter (AGI) View resources to bitmap");
    println!("Ver. {}\n", env!("CARGO_PKG_VERSION"));

    if args.views.is_empty() {
        println!("usage: agiview2bmp [view path(, view path, ...)]");
        return Ok(());
    }

    let options = ExportOptions{ format: args.format, out_dir: args.out_dir.clone() };
    let mut failures = 0;
    for view_path in &args.views {
        let result = if args.list {
            list(view_path)
        } else {
            convert(view_path, &options)
        };
        if let Err(e) = result {
            // Report and carry on with the next view.
            println!("Error: {}", e);
            log::debug!("{}: {:?}", view_path.display(), e);
            failures += 1;
        }
    }

    if failures != 0 {
        log::warn!("{} of {} views failed", failures, args.views.len());
        std::process::exit(1);
    }
    Ok(())
}
