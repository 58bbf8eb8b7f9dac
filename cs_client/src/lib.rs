//! Internal modules for the storefront client.
//!
//! This library provides the HTTP backend, command parsing, configuration
//! and the two front ends used by the cs_client binary.

pub mod actions;
pub mod api_client;
pub mod commands;
pub mod config;
pub mod logging;
pub mod render;
pub mod repl;
pub mod tui_app;
