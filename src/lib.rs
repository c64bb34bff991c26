pub mod config;
pub mod error;
pub mod findings;
pub mod parse;
pub mod validate;
pub mod wasm;
