// AgroCast - app/mod.rs
//
// Application layer: orchestration, state management, background analysis.
// Dependencies: core layer, platform file access.
// Must NOT depend on: ui.

pub mod analysis;
pub mod batch;
pub mod headless;
pub mod state;
