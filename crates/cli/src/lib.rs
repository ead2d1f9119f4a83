//! Terminal output for laserlookup tools
//!
//! Provides shared CLI functionality:
//! - Status messages
//! - Search results with highlighted matches
//! - Record detail listings

#![warn(missing_docs)]

pub mod output;
pub mod render;
