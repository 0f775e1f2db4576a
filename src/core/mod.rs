// AgroCast - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: ui, platform, app, or direct filesystem access
// (export writes to caller-supplied writers; `export_to_file` is the one
// convenience that opens a file).

pub mod catalog;
pub mod classifier;
pub mod export;
pub mod history;
pub mod i18n;
pub mod model;
pub mod speech;
pub mod weather;
