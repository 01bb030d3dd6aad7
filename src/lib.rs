// NewsSleuth - lib.rs
//
// Library entry point, exposing all modules for integration testing
// and programmatic use. The CLI in `main.rs` is a thin shell over this.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
