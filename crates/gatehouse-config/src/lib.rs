//! # Gatehouse Config
//!
//! Layered configuration loading for Gatehouse: TOML files plus
//! `GATEHOUSE_`-prefixed environment variable overrides.

pub mod app_config;
pub mod loader;

pub use app_config::*;
pub use loader::*;
