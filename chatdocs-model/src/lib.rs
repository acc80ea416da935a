//! # chatdocs-model
//!
//! Language-model capability for ChatDocs.
//!
//! ## Overview
//!
//! The [`LanguageModel`] trait is a single synchronous request/response
//! exchange: a fully composed prompt in, raw model text out. No streaming,
//! no internal retries, no timeout — callers own any such policy.
//!
//! Implementations:
//!
//! - [`GroqClient`] — Groq's OpenAI-compatible chat-completions API
//! - [`MockLlm`] — canned responses plus a prompt recorder, for tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chatdocs_model::{GroqClient, LanguageModel};
//!
//! let model = GroqClient::from_env()?; // reads GROQ_API_KEY
//! let answer = model.generate("Why is the sky blue?").await?;
//! ```

pub mod error;
pub mod groq;
pub mod language_model;
pub mod mock;

pub use error::{ModelError, Result};
pub use groq::GroqClient;
pub use language_model::LanguageModel;
pub use mock::MockLlm;
