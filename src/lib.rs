pub mod build_info;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod output;
pub mod position;
pub mod service;
pub mod store;
pub mod tui;
