//! Flows module - The commands built on top of core
//!
//! Provides:
//! - bundle: Concatenate manifest entries into one annotated document
//! - list: Resolve and check manifest entries without writing anything

pub mod bundle;
pub mod list;
