//! Core types and configuration for mdeploy.
//!
//! This crate defines the deployment target inputs: application settings
//! ([`AppSettings`], from `<target>.json`), deployment configuration
//! ([`DeployConfig`], from `<target>.config.json`), version resolution from
//! the project's sibling `package.json` ([`manifest`]), and shared error
//! types.

pub mod config;
pub mod error;
pub mod manifest;
pub mod settings;

pub use config::DeployConfig;
pub use error::{Error, Result};
pub use settings::AppSettings;
