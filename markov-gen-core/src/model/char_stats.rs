use std::fmt;

use serde::{Deserialize, Serialize};

/// Statistics of a single character following a given window.
///
/// `probability` and `cumulative_probability` are only meaningful once the
/// owning table has been normalized; any count change makes them stale.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CharacterStats {
	character: char,
	count: usize,
	probability: f64,
	cumulative_probability: f64,
}

impl CharacterStats {
	/// Creates a record for a first occurrence (`count = 1`).
	pub fn new(character: char) -> Self {
		Self {
			character,
			count: 1,
			probability: 0.0,
			cumulative_probability: 0.0,
		}
	}

	pub fn character(&self) -> char {
		self.character
	}

	pub fn count(&self) -> usize {
		self.count
	}

	pub fn probability(&self) -> f64 {
		self.probability
	}

	pub fn cumulative_probability(&self) -> f64 {
		self.cumulative_probability
	}

	pub(crate) fn increment(&mut self) {
		self.count += 1;
	}

	pub(crate) fn set_probabilities(&mut self, probability: f64, cumulative_probability: f64) {
		self.probability = probability;
		self.cumulative_probability = cumulative_probability;
	}
}

impl fmt::Display for CharacterStats {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"({} {} {} {})",
			self.character, self.count, self.probability, self.cumulative_probability
		)
	}
}
