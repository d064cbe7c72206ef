//! Batch execution
//!
//! The orchestrator runs the checkout pipeline for every address of a
//! request on top of an ordered, bounded executor.

mod executor;
mod orchestrator;


pub use executor::{ExecutedItem, ExecutorConfig, OrderedExecutor};
pub use orchestrator::BatchOrchestrator;
