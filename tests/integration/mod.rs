//! Integration tests

pub mod batch_tests;
pub mod config_tests;
pub mod http_runner_tests;
