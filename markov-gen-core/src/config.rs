use crate::error::{ModelError, Result};

/// Construction parameters for a [`LanguageModel`](crate::LanguageModel).
///
/// - `window_length`: Markov order, number of preceding characters used as context.
/// - `seed`: `Some` for reproducible generation, `None` for entropy seeding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModelConfig {
	pub window_length: usize,
	pub seed: Option<u64>,
}

impl ModelConfig {
	/// Seed used when a fixed, reproducible run is requested without an explicit value.
	pub const DEFAULT_SEED: u64 = 20;

	/// Entropy-seeded configuration.
	pub fn random(window_length: usize) -> Self {
		Self { window_length, seed: None }
	}

	/// Deterministic configuration.
	pub fn seeded(window_length: usize, seed: u64) -> Self {
		Self { window_length, seed: Some(seed) }
	}

	/// Checks that the window length is positive.
	pub fn validate(&self) -> Result<()> {
		if self.window_length == 0 {
			return Err(ModelError::InvalidWindowLength(self.window_length));
		}
		Ok(())
	}
}

impl Default for ModelConfig {
	fn default() -> Self {
		Self::seeded(1, Self::DEFAULT_SEED)
	}
}
