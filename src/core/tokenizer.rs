//! Token estimation for bundle statistics
//!
//! Bundles are usually pasted into an LLM prompt, so the size that matters is in
//! tokens. Counts use tiktoken encodings loaded lazily on first use; the
//! heuristic model avoids loading any encoding at all.

use once_cell::sync::Lazy;
use std::fmt;
use std::str::FromStr;
use tiktoken_rs::{cl100k_base, o200k_base, CoreBPE};

/// Supported token encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenModel {
    /// cl100k_base (GPT-4, GPT-3.5-turbo; a fair approximation for Claude)
    #[default]
    Cl100k,
    /// o200k_base (GPT-4o)
    O200k,
    /// Character-class estimate, no encoding loaded
    Heuristic,
}

impl TokenModel {
    fn get_bpe(&self) -> Option<&'static CoreBPE> {
        match self {
            TokenModel::Cl100k => CL100K_BPE.as_ref().ok(),
            TokenModel::O200k => O200K_BPE.as_ref().ok(),
            TokenModel::Heuristic => None,
        }
    }
}

impl fmt::Display for TokenModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenModel::Cl100k => "cl100k",
            TokenModel::O200k => "o200k",
            TokenModel::Heuristic => "heuristic",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for TokenModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cl100k" | "cl100k_base" | "gpt4" | "gpt-4" | "claude" => Ok(TokenModel::Cl100k),
            "o200k" | "o200k_base" | "gpt4o" | "gpt-4o" => Ok(TokenModel::O200k),
            "heuristic" | "fast" => Ok(TokenModel::Heuristic),
            _ => Err(format!(
                "Unknown token model: {}. Available: cl100k, o200k, heuristic",
                s
            )),
        }
    }
}

static CL100K_BPE: Lazy<Result<CoreBPE, String>> =
    Lazy::new(|| cl100k_base().map_err(|e| format!("Failed to load cl100k_base: {}", e)));

static O200K_BPE: Lazy<Result<CoreBPE, String>> =
    Lazy::new(|| o200k_base().map_err(|e| format!("Failed to load o200k_base: {}", e)));

/// Count tokens in `text`, falling back to the heuristic if the encoding failed to load
pub fn count_tokens(text: &str, model: TokenModel) -> usize {
    if text.is_empty() {
        return 0;
    }

    match model.get_bpe() {
        Some(bpe) => bpe.encode_with_special_tokens(text).len(),
        None => estimate_tokens_heuristic(text),
    }
}

/// Rough token estimate: ~4 ASCII chars per token, ~2 per punctuation mark,
/// one per non-ASCII char.
pub fn estimate_tokens_heuristic(text: &str) -> usize {
    let (mut word, mut symbol, mut wide) = (0usize, 0usize, 0usize);
    for c in text.chars() {
        if c.is_ascii_alphanumeric() || c.is_ascii_whitespace() {
            word += 1;
        } else if c.is_ascii() {
            symbol += 1;
        } else {
            wide += 1;
        }
    }
    word.div_ceil(4) + symbol.div_ceil(2) + wide
}
