//! Core utilities shared by the laserlookup crates
//!
//! This crate provides:
//!
//! - **Error handling**: errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with validation
//! - **Validation**: collects configuration problems into a single report
//!
//! # Example
//!
//! ```rust,no_run
//! use laserlookup_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("debounce: {}ms", config.schema.widget.debounce_ms);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};
