//! CLI entry point for the brick tiling tool

use bricktile::io::cli::{Cli, FileProcessor};
use clap::Parser;

fn main() -> bricktile::Result<()> {
    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
