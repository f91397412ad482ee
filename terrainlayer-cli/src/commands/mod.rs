//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration management (path, show, init)
//! - [`download`] - Pre-seed the tile cache
//! - [`mosaic`] - Build a single mosaic
//! - [`run`] - Headless streaming session

pub mod common;
pub mod config;
pub mod download;
pub mod mosaic;
pub mod run;
