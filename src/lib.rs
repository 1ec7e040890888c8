//! Bundle-Helpers: support code for web build tooling
//!
//! Stats error/warning extraction and formatting, public path and asset
//! prefix resolution, completion aggregation over multi-compiler hooks, and
//! small helpers shared by the build pipeline.

pub mod cli;
pub mod compiler;
pub mod config;
pub mod domain;
pub mod error;
pub mod paths;
pub mod stats;
pub mod utils;

pub use error::{HelperError, Result};
