//! Command-line interface

use clap::Parser;
use std::path::PathBuf;

/// Serve a single file over HTTP until interrupted
#[derive(Debug, Parser)]
#[command(name = "filecast", version, about)]
pub struct Cli {
    /// File to send to every GET request
    #[arg(value_name = "FILE TO SEND")]
    pub file: PathBuf,
}
