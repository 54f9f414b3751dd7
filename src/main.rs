//! consolidate - Bundle the files listed in a manifest into one document
//!
//! consolidate provides:
//! - `bundle`: write every manifest entry, with a filename/path header, into one file
//! - `list`: check and describe manifest entries without writing anything

use anyhow::Result;
use clap::Parser;

mod cli;
mod core;
mod flows;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
