//! Top-level module for the character Markov model.
//!
//! - Single character statistics (`CharacterStats`)
//! - Ordered per-window statistics (`WindowStatsTable`)
//! - The trained model itself (`LanguageModel`)
//! - Uniform random sources (`UniformSource`)
//! - Binary snapshots of trained models (`ModelSnapshot`)

/// One (character, count, probability, cumulative probability) record.
pub mod char_stats;

/// Ordered statistics for every character observed after one window.
///
/// Handles occurrence counting, normalization and inverse-CDF sampling.
pub mod window_stats;

/// Fixed-order character model: training over a corpus and generation.
pub mod language_model;

/// Source of uniform draws in `[0, 1)`.
pub mod random;

/// Serializable form of a trained model (postcard encoded).
pub mod snapshot;
