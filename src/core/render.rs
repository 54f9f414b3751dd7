//! Renderer module
//!
//! Renders a `list` ResultSet as jsonl, json or md

use crate::core::model::{Kind, ResultItem, ResultSet};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for result sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a result set to a string
    pub fn render(&self, result_set: &ResultSet) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(result_set),
            OutputFormat::Json => self.render_json(result_set),
            OutputFormat::Markdown => self.render_markdown(result_set),
        }
    }

    /// One JSON object per line
    fn render_jsonl(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    fn render_json(&self, result_set: &ResultSet) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Markdown: errors first (they block a bundle), then entries in manifest order
    fn render_markdown(&self, result_set: &ResultSet) -> String {
        let mut output = String::new();

        let (errors, entries): (Vec<&ResultItem>, Vec<&ResultItem>) = result_set
            .items
            .iter()
            .partition(|item| item.kind == Kind::Error);

        if !errors.is_empty() {
            output.push_str("## Errors\n\n");
            for item in errors {
                for error in &item.errors {
                    output.push_str(&format!(
                        "- line {}: **{}**: {}\n",
                        item.index, error.code, error.message
                    ));
                }
            }
            output.push('\n');
        }

        if !entries.is_empty() {
            output.push_str("## Entries\n\n");
            for item in entries {
                output.push_str(&format!("{}. `{}`", item.index, item.path));
                if let Some(size) = item.meta.size {
                    output.push_str(&format!(" ({} bytes", size));
                    if let Some(tokens) = item.meta.tokens {
                        output.push_str(&format!(", ~{} tokens", tokens));
                    }
                    output.push(')');
                }
                output.push_str(&format!(" -> `{}`\n", item.abs_path));
            }
            output.push('\n');
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ConsolidateError;
    use crate::core::model::Meta;
    use crate::core::paths::resolve_entry;
    use std::path::{Path, PathBuf};

    fn sample_set() -> ResultSet {
        let base = Path::new("/project");
        let mut result_set = ResultSet::new();
        result_set.push(ResultItem::entry(
            1,
            &resolve_entry(base, "src/main.rs"),
            Meta {
                size: Some(1024),
                tokens: Some(200),
                ..Default::default()
            },
        ));
        result_set.push(ResultItem::error(
            2,
            &resolve_entry(base, "gone.rs"),
            &ConsolidateError::SourceNotFound {
                path: PathBuf::from("/project/gone.rs"),
            },
        ));
        result_set
    }

    fn render(format: OutputFormat, pretty: bool) -> String {
        Renderer::with_config(RenderConfig::with_pretty(format, pretty)).render(&sample_set())
    }

    #[test]
    fn test_render_jsonl() {
        let output = render(OutputFormat::Jsonl, false);
        assert_eq!(output.lines().count(), 2);
        assert!(output.contains("src/main.rs"));
        assert!(output.contains("gone.rs"));
    }

    #[test]
    fn test_render_json() {
        let output = render(OutputFormat::Json, false);
        assert!(output.starts_with('['));
        assert!(output.ends_with(']'));
    }

    #[test]
    fn test_render_json_pretty() {
        assert!(render(OutputFormat::Json, true).contains("  "));
    }

    #[test]
    fn test_render_markdown() {
        let output = render(OutputFormat::Markdown, false);
        assert!(output.contains("## Errors"));
        assert!(output.contains("line 2: **NOT_FOUND**"));
        assert!(output.contains("## Entries"));
        assert!(output.contains("1. `src/main.rs` (1024 bytes, ~200 tokens) -> `/project/src/main.rs`"));
        assert!(output.find("## Errors").unwrap() < output.find("## Entries").unwrap());
    }

    #[test]
    fn test_render_markdown_empty() {
        let renderer = Renderer::with_config(RenderConfig::default());
        assert!(renderer.render(&ResultSet::new()).is_empty());
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!(
            "markdown".parse::<OutputFormat>().unwrap(),
            OutputFormat::Markdown
        );
        assert!("raw".parse::<OutputFormat>().unwrap_err().contains("Unknown format"));
    }
}
