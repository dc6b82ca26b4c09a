use std::collections::HashMap;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use super::language_model::LanguageModel;
use super::random::UniformSource;
use super::window_stats::WindowStatsTable;
use crate::error::{ModelError, Result};
use crate::io::snapshot_path;

/// Serializable form of a trained model.
///
/// Holds the window length and every window table, already normalized.
/// The random source is not part of a snapshot: a loaded model draws from
/// whatever source it is given.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ModelSnapshot {
	window_length: usize,
	windows: HashMap<String, WindowStatsTable>,
}

impl ModelSnapshot {
	pub fn window_length(&self) -> usize {
		self.window_length
	}

	/// Decodes a snapshot from a postcard file.
	pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
		let bytes = std::fs::read(path)?;
		Ok(postcard::from_bytes(&bytes)?)
	}

	/// Encodes the snapshot into a postcard file.
	pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		let bytes = postcard::to_stdvec(self)?;
		std::fs::write(path, bytes)?;
		Ok(())
	}
}

impl<R: UniformSource> LanguageModel<R> {
	/// Captures the trained mapping.
	pub fn snapshot(&self) -> ModelSnapshot {
		ModelSnapshot {
			window_length: self.window_length(),
			windows: self.windows.clone(),
		}
	}

	/// Rebuilds a trained model from a snapshot and a random source.
	///
	/// # Errors
	/// - `InvalidWindowLength` if the snapshot's window length is 0.
	/// - `InvalidSnapshot` if a window or a table breaks the model invariants.
	pub fn from_snapshot(snapshot: ModelSnapshot, source: R) -> Result<Self> {
		let mut model = Self::with_source(snapshot.window_length, source)?;
		model.install(snapshot)?;
		Ok(model)
	}

	/// Validates the snapshot's tables, renormalizes them and marks the model trained.
	///
	/// Probabilities are recomputed from counts rather than trusted.
	fn install(&mut self, snapshot: ModelSnapshot) -> Result<()> {
		let mut windows = snapshot.windows;
		for (window, table) in windows.iter_mut() {
			let length = window.chars().count();
			if length != self.window_length() {
				return Err(ModelError::InvalidSnapshot(format!(
					"window {:?} has {} characters, expected {}",
					window,
					length,
					self.window_length()
				)));
			}
			table
				.check_invariants()
				.map_err(|reason| ModelError::InvalidSnapshot(format!("window {window:?}: {reason}")))?;
			table.normalize()?;
		}

		self.windows = windows;
		self.trained = true;
		Ok(())
	}

	/// Writes the trained mapping to `path`.
	pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
		self.snapshot().write(&path)?;
		info!("saved {} windows to {}", self.window_count(), path.as_ref().display());
		Ok(())
	}

	/// Loads a model previously written with [`save`](Self::save).
	pub fn load<P: AsRef<Path>>(path: P, source: R) -> Result<Self> {
		let model = Self::from_snapshot(ModelSnapshot::read(&path)?, source)?;
		info!("loaded {} windows from {}", model.window_count(), path.as_ref().display());
		Ok(model)
	}

	/// Trains from a corpus file, going through a binary snapshot.
	///
	/// - If `<stem>.w<N>.bin` exists next to the corpus, it is loaded instead.
	/// - Otherwise the corpus is read, the model trained, and the snapshot written
	///   for future fast loading.
	///
	/// # Errors
	/// - `AlreadyTrained` if the model was already populated.
	/// - `SnapshotMismatch` if the cached snapshot has another window length.
	/// - Any training or I/O error.
	pub fn train_file_cached<P: AsRef<Path>>(&mut self, corpus_path: P) -> Result<()> {
		if self.is_trained() {
			return Err(ModelError::AlreadyTrained);
		}

		let binary_data_path = snapshot_path(&corpus_path, self.window_length())?;
		if binary_data_path.exists() {
			let snapshot = ModelSnapshot::read(&binary_data_path)?;
			if snapshot.window_length != self.window_length() {
				return Err(ModelError::SnapshotMismatch {
					expected: self.window_length(),
					found: snapshot.window_length,
				});
			}
			self.install(snapshot)?;
			info!("loaded {} windows from {}", self.window_count(), binary_data_path.display());
			return Ok(());
		}

		self.train_file(&corpus_path)?;
		self.save(&binary_data_path)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn snapshot_round_trip_keeps_tables() {
		let mut model = LanguageModel::with_seed(2, 20).unwrap();
		model.train("to be or not to be".chars()).unwrap();

		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("model.bin");
		model.snapshot().write(&path).unwrap();

		let snapshot = ModelSnapshot::read(&path).unwrap();
		assert_eq!(snapshot, model.snapshot());
		assert_eq!(snapshot.window_length(), 2);
	}

	#[test]
	fn loaded_model_is_trained() {
		let mut model = LanguageModel::with_seed(1, 3).unwrap();
		model.train("abcabc".chars()).unwrap();

		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("model.bin");
		model.save(&path).unwrap();

		let mut loaded = LanguageModel::load(&path, StdRng::seed_from_u64(3)).unwrap();
		assert!(loaded.is_trained());
		assert_eq!(loaded.window_count(), 3);
		assert!(matches!(loaded.train("abc".chars()), Err(ModelError::AlreadyTrained)));
	}

	#[test]
	fn malformed_tables_are_rejected_on_load() {
		let mut windows = HashMap::new();
		windows.insert("ab".to_owned(), WindowStatsTable::new());
		let snapshot = ModelSnapshot { window_length: 2, windows };

		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("model.bin");
		snapshot.write(&path).unwrap();

		let err = LanguageModel::load(&path, StdRng::seed_from_u64(1)).err().unwrap();
		assert!(matches!(err, ModelError::InvalidSnapshot(_)));
	}

	#[test]
	fn wrong_key_length_is_rejected() {
		let mut table = WindowStatsTable::new();
		table.record_occurrence('x');
		let mut windows = HashMap::new();
		windows.insert("toolong".to_owned(), table);
		let snapshot = ModelSnapshot { window_length: 2, windows };

		let err = LanguageModel::from_snapshot(snapshot, StdRng::seed_from_u64(1)).err().unwrap();
		assert!(err.to_string().contains("\"toolong\" has 7 characters"));
	}

	#[test]
	fn stale_probabilities_are_recomputed() {
		// Counts only, never normalized
		let mut table = WindowStatsTable::new();
		for c in "aab".chars() {
			table.record_occurrence(c);
		}
		let mut windows = HashMap::new();
		windows.insert("a".to_owned(), table);
		let snapshot = ModelSnapshot { window_length: 1, windows };

		let mut model = LanguageModel::from_snapshot(snapshot, StdRng::seed_from_u64(1)).unwrap();
		let last = model.table("a").unwrap().get(1).unwrap();
		assert!((last.cumulative_probability() - 1.0).abs() < 1e-12);
		assert_eq!(model.generate("a", 2).unwrap().chars().count(), 2);
	}

	#[test]
	fn garbage_file_is_a_snapshot_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("model.bin");
		std::fs::write(&path, [0xff, 0xff, 0xff]).unwrap();
		assert!(ModelSnapshot::read(&path).is_err());
	}
}
