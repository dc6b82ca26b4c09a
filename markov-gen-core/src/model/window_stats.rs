use std::collections::VecDeque;
use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use super::char_stats::CharacterStats;
use crate::error::{ModelError, Result};

/// Statistics of every character observed right after one window.
///
/// Conceptually, this is a node in a Markov chain whose outgoing edges are
/// weighted by their number of observations.
///
/// ## Responsibilities:
/// - Accumulate occurrences during training
/// - Turn counts into probabilities and cumulative probabilities
/// - Select the next character from a uniform draw (inverse CDF scan)
///
/// ## Invariants
/// - At most one entry per distinct character
/// - Entries are ordered newest-first: a character seen for the first time
///   is placed in front. Normalization and sampling both walk this order, so
///   the same seed and the same corpus always produce the same output.
/// - Every count is strictly positive
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct WindowStatsTable {
	entries: VecDeque<CharacterStats>,
}

impl WindowStatsTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self { entries: VecDeque::new() }
	}

	/// Number of distinct characters in the table.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Newest entry, if any.
	pub fn first(&self) -> Option<&CharacterStats> {
		self.entries.front()
	}

	/// Position of `character` in the table.
	pub fn index_of(&self, character: char) -> Option<usize> {
		self.entries.iter().position(|stats| stats.character() == character)
	}

	/// Returns the entry at `index`.
	///
	/// # Errors
	/// Returns `IndexOutOfBounds` if `index >= len()`.
	pub fn get(&self, index: usize) -> Result<&CharacterStats> {
		self.entries.get(index).ok_or(ModelError::IndexOutOfBounds {
			index,
			len: self.entries.len(),
		})
	}

	/// Iterates over the entries in table order (newest first).
	pub fn iter(&self) -> impl Iterator<Item = &CharacterStats> {
		self.entries.iter()
	}

	/// Records that `character` followed this window once more.
	///
	/// - If an entry exists, its count is increased.
	/// - Otherwise, a new entry with a count of 1 is placed in front.
	///
	/// Probabilities are stale until the next `normalize`.
	pub fn record_occurrence(&mut self, character: char) {
		match self.entries.iter_mut().find(|stats| stats.character() == character) {
			Some(stats) => stats.increment(),
			None => self.entries.push_front(CharacterStats::new(character)),
		}
	}

	/// Removes the entry for `character`, keeping the order of the others.
	///
	/// Returns `false` if the character is not in the table.
	/// Probabilities are stale until the next `normalize`.
	pub fn remove(&mut self, character: char) -> bool {
		match self.index_of(character) {
			Some(index) => self.entries.remove(index).is_some(),
			None => false,
		}
	}

	/// Checks the table invariants on data that did not come from
	/// `record_occurrence` (e.g. a decoded snapshot).
	///
	/// Returns the first broken invariant, if any.
	pub(crate) fn check_invariants(&self) -> std::result::Result<(), String> {
		if self.entries.is_empty() {
			return Err("table has no entries".to_owned());
		}
		for (i, stats) in self.entries.iter().enumerate() {
			if stats.count() == 0 {
				return Err(format!("{:?} has a zero count", stats.character()));
			}
			if self.entries.iter().skip(i + 1).any(|other| other.character() == stats.character()) {
				return Err(format!("{:?} appears more than once", stats.character()));
			}
		}
		Ok(())
	}

	/// Computes `probability = count / total` for each entry and the running
	/// sum of probabilities in table order.
	///
	/// Calling it again on an unchanged table yields identical values.
	///
	/// # Errors
	/// Returns `EmptyTable` if there is nothing to normalize.
	pub fn normalize(&mut self) -> Result<()> {
		if self.entries.is_empty() {
			return Err(ModelError::EmptyTable);
		}

		let total: usize = self.entries.iter().map(CharacterStats::count).sum();
		let total = total as f64;

		let mut cumulative = 0.0;
		for stats in &mut self.entries {
			let probability = stats.count() as f64 / total;
			cumulative += probability;
			stats.set_probabilities(probability, cumulative);
		}

		Ok(())
	}

	/// Selects a character from a uniform `draw` in `[0, 1)`.
	///
	/// Returns the first entry whose cumulative probability is strictly
	/// greater than `draw`. If rounding leaves the last cumulative
	/// probability below `draw`, the last entry is returned.
	///
	/// # Errors
	/// - `InvalidDraw` if `draw` is outside `[0, 1)`.
	/// - `EmptyTable` if the table has no entries.
	pub fn sample_character(&self, draw: f64) -> Result<char> {
		if !(0.0..1.0).contains(&draw) {
			return Err(ModelError::InvalidDraw(draw));
		}

		let last = self.entries.back().ok_or(ModelError::EmptyTable)?;
		if let Some(stats) = self.entries.iter().find(|stats| draw < stats.cumulative_probability()) {
			return Ok(stats.character());
		}

		warn!(
			"draw {} above last cumulative probability {}, falling back to {:?}",
			draw,
			last.cumulative_probability(),
			last.character()
		);
		Ok(last.character())
	}
}

impl fmt::Display for WindowStatsTable {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "(")?;
		for (i, stats) in self.entries.iter().enumerate() {
			if i > 0 {
				write!(f, " ")?;
			}
			write!(f, "{stats}")?;
		}
		write!(f, ")")
	}
}
