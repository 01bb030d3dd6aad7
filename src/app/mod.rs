// NewsSleuth - app/mod.rs
//
// Application layer: analysis orchestration and history persistence.
// Dependencies: core layer.
// Must NOT depend on: platform specifics or the CLI.

pub mod history;
pub mod service;
