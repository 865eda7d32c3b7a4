
pub mod aggregator_core;
pub mod config;
pub mod state;
pub mod ui;
