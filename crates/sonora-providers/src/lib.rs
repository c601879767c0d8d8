//! Provider layer for Sonora.
//!
//! Routes one normalized chat request to one of several LLM HTTP APIs.
//!
//! # Architecture
//!
//! - [`registry`] — static descriptors for the 7 supported providers
//! - [`translate`] — pure conversation → provider payload functions
//! - [`client`] — one HTTP call per family, reply extraction
//! - [`router::ChatRouter`] — validate, translate, dispatch, normalize
//! - [`error::ChatError`] — failure taxonomy

pub mod client;
pub mod error;
pub mod registry;
pub mod router;
pub mod translate;

// Re-export main types for convenience
pub use error::ChatError;
pub use registry::{lookup, Family, ProviderDescriptor, PROVIDERS};
pub use router::ChatRouter;
