//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::core::file_reader::ProbeConfig;
use crate::core::manifest::DEFAULT_MANIFEST;
use crate::core::paths::{resolve_against, resolve_base_dir};
use crate::core::render::{OutputFormat, RenderConfig};
use crate::core::tokenizer::TokenModel;
use crate::flows::bundle::{BundleOptions, DEFAULT_OUTPUT};

/// consolidate - bundle the files listed in a manifest into one annotated document.
#[derive(Parser, Debug)]
#[command(name = "consolidate")]
#[command(
    author,
    version,
    about,
    long_about = r#"consolidate reads a manifest (one path per line), and writes every listed
file into a single output document. Each file is preceded by a header naming
the path as written and the absolute path it resolved to:

    # Filename: src/main.rs
    # Path: /home/me/project/src/main.rs

Running without a subcommand is the same as `consolidate bundle`.

Examples:
    consolidate
    consolidate --manifest files.txt --output bundle.txt
    consolidate bundle --stats
    consolidate list --format md
"#
)]
pub struct Cli {
    /// Base directory manifest entries are resolved against.
    #[arg(
        long,
        global = true,
        env = "CONSOLIDATE_ROOT",
        value_name = "ROOT",
        long_help = "Base directory manifest entries are resolved against (defaults to the\n\
current directory).\n\n\
The absolute path in each header is the manifest line joined onto this directory.\n\
Relative --manifest and --output paths are also resolved against it."
    )]
    pub root: Option<PathBuf>,

    /// Manifest file listing the paths to bundle.
    #[arg(
        long,
        global = true,
        env = "CONSOLIDATE_MANIFEST",
        default_value = DEFAULT_MANIFEST,
        value_name = "FILE",
        long_help = "Manifest file: UTF-8 text, one path per line, in output order.\n\n\
Lines are trimmed of surrounding whitespace. There are no comments or globs."
    )]
    pub manifest: PathBuf,

    /// Output file to (re)write.
    #[arg(
        long,
        global = true,
        env = "CONSOLIDATE_OUTPUT",
        default_value = DEFAULT_OUTPUT,
        value_name = "FILE",
        long_help = "Output file. It is truncated and rewritten on every run, once the\n\
manifest has been opened successfully."
    )]
    pub output: PathBuf,

    /// Disable colored output (when applicable).
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (log every block written).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Enable debug logging on stderr. RUST_LOG, when set, takes precedence\n\
over both --verbose and --quiet."
    )]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the bundle (the default command).
    #[command(
        long_about = "Read the manifest and write one header + content block per line to the\n\
output file, in manifest order.\n\n\
The first entry that is missing, unreadable or not valid UTF-8 stops the run.\n\
Blocks written before it remain in the output.\n\n\
Examples:\n\
  consolidate bundle\n\
  consolidate bundle --stats --token-model o200k\n"
    )]
    Bundle {
        /// Print bundle statistics on stderr.
        #[arg(long)]
        stats: bool,

        /// Token model used by --stats (cl100k/o200k/heuristic).
        #[arg(long, default_value = "cl100k", value_name = "MODEL")]
        token_model: String,
    },

    /// Check every manifest entry without writing the bundle.
    #[command(
        long_about = "Resolve each manifest line and report it with size, hash, line and\n\
token counts. Entries that would stop a bundle are reported as errors, and the\n\
command exits non-zero if there are any.\n\n\
Examples:\n\
  consolidate list\n\
  consolidate list --format md\n\
  consolidate list --hash sha1 --format json --pretty\n"
    )]
    List {
        /// Output format (jsonl/json/md).
        #[arg(long, default_value = "jsonl", value_name = "FORMAT")]
        format: String,

        /// Pretty-print JSON/JSONL output with indentation.
        #[arg(long)]
        pretty: bool,

        /// Content hash algorithm (xxh3/sha1).
        #[arg(long, default_value = "xxh3", value_name = "ALGO")]
        hash: String,

        /// Token model for per-entry token counts (cl100k/o200k/heuristic).
        #[arg(long, default_value = "cl100k", value_name = "MODEL")]
        token_model: String,
    },
}

/// Install the stderr log subscriber
fn init_tracing(verbose: bool, quiet: bool, no_color: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // try_init: tests may have installed a subscriber already
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(!no_color)
        .without_time()
        .try_init();
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose, cli.quiet, cli.no_color);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let base_dir =
        resolve_base_dir(cli.root.as_deref()).context("cannot determine base directory")?;
    let manifest = resolve_against(&base_dir, &cli.manifest);
    let output = resolve_against(&base_dir, &cli.output);
    tracing::debug!(base_dir = %base_dir.display(), "resolved base directory");

    let command = cli.command.unwrap_or(Commands::Bundle {
        stats: false,
        token_model: TokenModel::default().to_string(),
    });

    match command {
        Commands::Bundle { stats, token_model } => {
            let token_model: TokenModel = token_model.parse().map_err(anyhow::Error::msg)?;
            let opts = BundleOptions {
                manifest,
                output,
                token_model: stats.then_some(token_model),
                ..BundleOptions::new(base_dir)
            };
            crate::flows::bundle::run_bundle(opts, stats)
        }

        Commands::List {
            format,
            pretty,
            hash,
            token_model,
        } => {
            let format: OutputFormat = format.parse().map_err(anyhow::Error::msg)?;
            let probe = ProbeConfig {
                hash: hash.parse().map_err(anyhow::Error::msg)?,
                token_model: token_model.parse().map_err(anyhow::Error::msg)?,
            };
            crate::flows::list::run_list(
                &base_dir,
                &manifest,
                probe,
                RenderConfig::with_pretty(format, pretty),
            )
        }
    }
}
