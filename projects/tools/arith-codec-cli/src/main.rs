#![cfg(not(tarpaulin_include))]

mod commands;
mod error;
mod util;

use argh::FromArgs;
use std::process::ExitCode;

#[derive(FromArgs, Debug)]
/// Lossy image codec for PPM files
struct TopLevel {
    #[argh(subcommand)]
    command: Commands,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Commands {
    Compress(commands::compress::CompressCmd),
    Decompress(commands::decompress::DecompressCmd),
    Diff(commands::diff::DiffCmd),
}

fn main() -> ExitCode {
    let cli: TopLevel = argh::from_env();

    let result = match cli.command {
        Commands::Compress(cmd) => commands::compress::handle_compress_command(cmd),
        Commands::Decompress(cmd) => commands::decompress::handle_decompress_command(cmd),
        Commands::Diff(cmd) => commands::diff::handle_diff_command(cmd),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}
