//! Configuration validation
//!
//! - `trait_def`: the `Validate` trait
//! - `config_validators`: implementations for every configuration section
//! - `tests`: validator tests

mod config_validators;
mod trait_def;

pub use trait_def::Validate;
