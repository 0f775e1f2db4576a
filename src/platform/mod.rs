// AgroCast - platform/mod.rs
//
// Platform abstraction layer: directories and config, image files on disk,
// speech backends.
// Must NOT depend on: app, ui.

pub mod config;
pub mod fs;
pub mod speech;
