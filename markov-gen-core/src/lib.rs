//! Fixed-order character-level Markov text generation.
//!
//! This crate provides:
//! - Per-window character statistics with cumulative probabilities
//! - A language model trained once from a character stream
//! - Weighted random generation driven by an injectable uniform source
//! - Binary snapshots of trained models
//!
//! Typical lifecycle: construct, train once, generate any number of times.

/// Language model, window statistics and random sources.
pub mod model;

/// Model construction parameters.
pub mod config;

/// Errors returned by the model.
pub mod error;

/// I/O utilities (corpus loading, snapshot paths).
pub mod io;

pub use config::ModelConfig;
pub use error::{ModelError, Result};
pub use model::language_model::LanguageModel;
