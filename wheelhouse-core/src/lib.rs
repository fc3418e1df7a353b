//! Wheelhouse Core Library
//!
//! This crate provides the configuration model for the Wheelhouse admin
//! core: the document types, their validation rules, the file loader,
//! and error handling shared by the other crates.

pub mod config;
pub mod error;

pub use error::{Error, Result};

/// Wheelhouse version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
