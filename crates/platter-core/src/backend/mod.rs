//! Backend adapter interface for the generative collaborator.
//!
//! This module defines the [`Backend`] trait that generation adapters
//! implement, the [`BackendConfig`] they are constructed from, and the
//! [`OpenAiBackend`] adapter for OpenAI-compatible APIs.
//!
//! # Architecture
//!
//! ```text
//! Orchestrator
//!     |
//!     v
//! Arc<dyn Backend>
//!     |
//!     |  generate_text(system, prompt)  --> String
//!     |  generate_image(prompt)         --> Bytes (downloaded PNG)
//!     |  synthesize_speech(text)        --> Bytes (MP3)
//! ```
//!
//! The backend is an explicitly constructed, injected dependency, so
//! tests substitute a scripted fake without touching process state.

pub mod openai;
pub mod trait_def;
pub mod types;

pub use openai::OpenAiBackend;
pub use trait_def::Backend;
pub use types::BackendConfig;
