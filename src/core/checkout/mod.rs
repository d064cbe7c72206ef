//! Checkout pipeline and its stage machine

mod pipeline;
mod stage;


pub use pipeline::{CheckoutPipeline, PipelineSettings, StepError};
pub use stage::CheckoutStage;
