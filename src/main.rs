use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use station_summary::cli::{args::Args, commands};
use std::process;

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    let input = args
        .input_path()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "configured input".to_string());

    match commands::run(args).with_context(|| format!("Failed to summarise {}", input)) {
        Ok(_outcome) => {
            // Summary and timing have already been written by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("{} {:#}", "Error:".red().bold(), error);
            process::exit(1);
        }
    }
}
