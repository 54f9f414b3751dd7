//! List flow - Resolve every manifest entry without writing a bundle
//!
//! Reports each line as an entry (with size, hash, line and token counts) or as
//! an error item. Unlike bundling, a bad entry does not stop the walk, so one run
//! shows every problem. The command still fails at the end if any entry would
//! abort a bundle.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::core::file_reader::{probe_file, ProbeConfig};
use crate::core::manifest::Manifest;
use crate::core::model::{ResultItem, ResultSet};
use crate::core::paths::resolve_entry;
use crate::core::render::{RenderConfig, Renderer};

/// Resolve and probe every manifest entry, in manifest order
pub fn list_entries(base_dir: &Path, manifest: &Path, probe: &ProbeConfig) -> Result<ResultSet> {
    let manifest = Manifest::open(manifest)?;
    tracing::debug!(manifest = %manifest.path().display(), "listing entries");

    let mut result_set = ResultSet::new();
    for (idx, line) in manifest.enumerate() {
        let line = line?;
        let entry = resolve_entry(base_dir, &line);
        let item = match probe_file(&entry.absolute, probe) {
            Ok(meta) => ResultItem::entry(idx + 1, &entry, meta),
            Err(err) => {
                tracing::warn!(index = idx + 1, path = %entry.relative, "{}", err);
                ResultItem::error(idx + 1, &entry, &err)
            }
        };
        result_set.push(item);
    }

    Ok(result_set)
}

/// Run the list command
pub fn run_list(
    base_dir: &Path,
    manifest: &Path,
    probe: ProbeConfig,
    config: RenderConfig,
) -> Result<()> {
    let result_set = list_entries(base_dir, manifest, &probe)
        .with_context(|| format!("failed to list {}", manifest.display()))?;

    let renderer = Renderer::with_config(config);
    let rendered = renderer.render(&result_set);
    if !rendered.is_empty() {
        println!("{}", rendered);
    }

    let errors = result_set.error_count();
    if errors > 0 {
        bail!(
            "{} of {} manifest entries cannot be bundled",
            errors,
            result_set.len()
        );
    }
    Ok(())
}
