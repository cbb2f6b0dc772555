//! Report generation.

pub mod generator;

pub use generator::{excerpt, generate_json_report, generate_markdown_report};
