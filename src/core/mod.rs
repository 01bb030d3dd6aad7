// NewsSleuth - core/mod.rs
//
// Core business logic layer: content signals, verdict scoring, text
// templates, rendering and export.
// Must NOT depend on: app or platform, and never touches the filesystem.

pub mod analyzer;
pub mod export;
pub mod heuristics;
pub mod model;
pub mod report;
pub mod templates;
