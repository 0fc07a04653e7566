//! HTTP inference boundary
//!
//! A single request/response operation against a configured endpoint, plus
//! the prompt contract applied at the boundary input and a worker pipeline
//! that keeps the blocking UI thread away from the network.

pub mod client;
pub mod pipeline;
pub mod schema;

pub use client::{InferenceClient, InferenceConfig, FALLBACK_REPLY};
pub use pipeline::{InferenceCommand, InferenceEvent, InferencePipeline};
pub use schema::{validate_prompt, MIN_PROMPT_LEN};
