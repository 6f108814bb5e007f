//! CLI module for deepresearch
//!
//! Handles command-line argument parsing and configuration management.

pub mod args;
pub mod config;

pub use args::Args;
pub use config::Config;
