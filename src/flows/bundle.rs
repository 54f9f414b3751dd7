//! Bundle flow - Concatenate manifest entries into one annotated document
//!
//! Each manifest line becomes one block in the output:
//!
//! ```text
//!
//!
//! # Filename: <line as written>
//! # Path: <line joined onto the base directory>
//!
//! <file content, verbatim>
//! ```
//!
//! Blocks follow manifest order with nothing between them. The first failing
//! entry aborts the run; blocks already written stay in the output.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::error::ConsolidateError;
use crate::core::file_reader::read_source;
use crate::core::manifest::{Manifest, DEFAULT_MANIFEST};
use crate::core::paths::{resolve_entry, ResolvedEntry};
use crate::core::tokenizer::{count_tokens, TokenModel};

/// Default output file name
pub const DEFAULT_OUTPUT: &str = "codebase.txt";

/// Settings for one bundle run
#[derive(Debug, Clone)]
pub struct BundleOptions {
    /// Directory manifest entries are joined onto
    pub base_dir: PathBuf,
    pub manifest: PathBuf,
    pub output: PathBuf,
    /// Count tokens while writing (only needed for `--stats`)
    pub token_model: Option<TokenModel>,
}

impl BundleOptions {
    /// Default file names under `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            manifest: base_dir.join(DEFAULT_MANIFEST),
            output: base_dir.join(DEFAULT_OUTPUT),
            base_dir,
            token_model: None,
        }
    }
}

/// Summary of a finished bundle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BundleStats {
    pub blocks: usize,
    pub bytes_written: u64,
    pub content_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_model: Option<String>,
}

/// Render the header that precedes a file's content
pub fn block_header(entry: &ResolvedEntry) -> String {
    format!(
        "\n\n# Filename: {}\n# Path: {}\n\n",
        entry.relative,
        entry.display_absolute()
    )
}

/// Appends blocks to an output stream and keeps count of what went out
pub struct BlockWriter<W: Write> {
    inner: W,
    blocks: usize,
    bytes_written: u64,
    content_bytes: u64,
}

impl<W: Write> BlockWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            blocks: 0,
            bytes_written: 0,
            content_bytes: 0,
        }
    }

    /// Write one header + content block
    pub fn write_block(&mut self, entry: &ResolvedEntry, content: &str) -> io::Result<()> {
        let header = block_header(entry);
        self.inner.write_all(header.as_bytes())?;
        self.inner.write_all(content.as_bytes())?;

        self.blocks += 1;
        self.bytes_written += (header.len() + content.len()) as u64;
        self.content_bytes += content.len() as u64;
        Ok(())
    }

    /// Flush and return the totals
    pub fn finish(mut self) -> io::Result<BundleStats> {
        self.inner.flush()?;
        Ok(BundleStats {
            blocks: self.blocks,
            bytes_written: self.bytes_written,
            content_bytes: self.content_bytes,
            tokens: None,
            token_model: None,
        })
    }
}

/// Run the bundle to completion or to the first failing entry.
///
/// The manifest is opened before the output is created, so a missing manifest
/// leaves an existing output file untouched.
pub fn consolidate(opts: &BundleOptions) -> Result<BundleStats, ConsolidateError> {
    let manifest = Manifest::open(&opts.manifest)?;

    let output_err = |source: io::Error| ConsolidateError::Output {
        path: opts.output.clone(),
        source,
    };
    let file = File::create(&opts.output).map_err(output_err)?;
    // On an early return the BufWriter is dropped, which flushes completed blocks.
    let mut writer = BlockWriter::new(BufWriter::new(file));
    let mut tokens = 0usize;

    for (idx, line) in manifest.enumerate() {
        let line = line?;
        let entry = resolve_entry(&opts.base_dir, &line);
        let content = read_source(&entry.absolute)?;

        writer.write_block(&entry, &content).map_err(output_err)?;
        if let Some(model) = opts.token_model {
            tokens += count_tokens(&block_header(&entry), model) + count_tokens(&content, model);
        }

        tracing::debug!(
            index = idx + 1,
            path = %entry.relative,
            bytes = content.len(),
            "wrote block"
        );
    }

    let mut stats = writer.finish().map_err(output_err)?;
    if let Some(model) = opts.token_model {
        stats.tokens = Some(tokens);
        stats.token_model = Some(model.to_string());
    }
    Ok(stats)
}

fn print_stats(output: &Path, stats: &BundleStats) {
    eprintln!("{}", "Bundle Statistics:".bold());
    eprintln!("   Output: {}", output.display());
    eprintln!("   Blocks: {}", stats.blocks.to_string().green());
    eprintln!(
        "   Bytes: {} ({} content)",
        stats.bytes_written, stats.content_bytes
    );
    if let (Some(tokens), Some(model)) = (stats.tokens, &stats.token_model) {
        eprintln!("   Tokens: {} (model: {})", tokens.to_string().cyan(), model);
    }
}

/// Run the bundle command
pub fn run_bundle(opts: BundleOptions, show_stats: bool) -> Result<()> {
    let stats = consolidate(&opts).with_context(|| {
        format!(
            "failed to bundle {} into {}",
            opts.manifest.display(),
            opts.output.display()
        )
    })?;

    tracing::info!(
        blocks = stats.blocks,
        bytes = stats.bytes_written,
        output = %opts.output.display(),
        "bundle written"
    );

    if show_stats {
        print_stats(&opts.output, &stats);
    }

    Ok(())
}
