//! Configuration loading and schema definitions
//!
//! Shared by the CLI, the WASM bindings and tests.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
