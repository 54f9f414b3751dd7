//! Core module - Building blocks shared by the bundle and list commands
//!
//! This module provides:
//! - Manifest reading
//! - Path resolution against the base directory
//! - Strict source reading and probing
//! - The error taxonomy
//! - Result model and rendering for `list`
//! - Token counting for bundle statistics

pub mod error;
pub mod file_reader;
pub mod manifest;
pub mod model;
pub mod paths;
pub mod render;
pub mod tokenizer;
pub mod util;
