//! Source file reading
//!
//! Bundling reads every source strictly: the whole file, valid UTF-8, or an
//! error naming the file. `probe_file` is the non-failing variant used by
//! `list`, which reports problems per entry instead of aborting.

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::core::error::ConsolidateError;
use crate::core::model::Meta;
use crate::core::tokenizer::{count_tokens, TokenModel};
use crate::core::util::{get_mtime_ms, hash_bytes, HashAlgorithm};

/// Read an entire source file as UTF-8 text
pub fn read_source(path: &Path) -> Result<String, ConsolidateError> {
    let mut file = fs::File::open(path).map_err(|e| ConsolidateError::from_source_io(path, e))?;
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| ConsolidateError::from_source_io(path, e))?;
    Ok(content)
}

/// Options controlling what `probe_file` computes
#[derive(Debug, Clone, Copy, Default)]
pub struct ProbeConfig {
    pub hash: HashAlgorithm,
    pub token_model: TokenModel,
}

/// Read a file the same way bundling would and collect metadata about it
pub fn probe_file(path: &Path, config: &ProbeConfig) -> Result<Meta, ConsolidateError> {
    let bytes = fs::read(path).map_err(|e| ConsolidateError::from_source_io(path, e))?;
    let content = std::str::from_utf8(&bytes).map_err(|_| ConsolidateError::Decode {
        path: path.to_path_buf(),
    })?;

    Ok(Meta {
        mtime_ms: get_mtime_ms(path).ok(),
        size: Some(bytes.len() as u64),
        hash: Some(hash_bytes(&bytes, config.hash)),
        lines: Some(content.lines().count()),
        tokens: Some(count_tokens(content, config.token_model)),
    })
}
