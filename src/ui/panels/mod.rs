// AgroCast - ui/panels/mod.rs

pub mod about;
pub mod dashboard;
pub mod history;
pub mod top_bar;
pub mod upload;
