use std::{fmt, io};

/// Errors produced while building, training, sampling or persisting a model.
///
/// # Variants
/// - `InvalidWindowLength`: the window length must be at least 1.
/// - `InsufficientInput`: the corpus holds fewer characters than one window.
///   Nothing is trained.
/// - `AlreadyTrained`: `train` was called on a populated model.
/// - `IndexOutOfBounds`: positional access past the end of a window table.
/// - `InvalidDraw`: a random draw outside `[0, 1)`.
/// - `EmptyTable`: normalization or sampling on a table without entries.
/// - `SnapshotMismatch`: a cached snapshot was built with another window length.
/// - `InvalidSnapshot`: a decoded snapshot breaks a model invariant
///   (empty table, wrong key length, duplicated character, zero count).
/// - `Io` / `Snapshot`: file access or binary encoding failures.
#[derive(Debug)]
pub enum ModelError {
	InvalidWindowLength(usize),
	InsufficientInput {
		window_length: usize,
		available: usize,
	},
	AlreadyTrained,
	IndexOutOfBounds {
		index: usize,
		len: usize,
	},
	InvalidDraw(f64),
	EmptyTable,
	SnapshotMismatch {
		expected: usize,
		found: usize,
	},
	InvalidSnapshot(String),
	Io(io::Error),
	Snapshot(postcard::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ModelError>;

impl fmt::Display for ModelError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ModelError::InvalidWindowLength(n) => write!(f, "window length must be >= 1, got {n}"),
			ModelError::InsufficientInput { window_length, available } => write!(
				f,
				"corpus too short: need at least {window_length} characters, got {available}"
			),
			ModelError::AlreadyTrained => write!(f, "model is already trained"),
			ModelError::IndexOutOfBounds { index, len } => {
				write!(f, "index {index} out of bounds for table of length {len}")
			}
			ModelError::InvalidDraw(draw) => write!(f, "random draw must be in [0, 1), got {draw}"),
			ModelError::EmptyTable => write!(f, "window table has no entries"),
			ModelError::SnapshotMismatch { expected, found } => {
				write!(f, "snapshot window length {found} does not match model window length {expected}")
			}
			ModelError::InvalidSnapshot(reason) => write!(f, "invalid snapshot: {reason}"),
			ModelError::Io(e) => write!(f, "i/o error: {e}"),
			ModelError::Snapshot(e) => write!(f, "snapshot error: {e}"),
		}
	}
}

impl std::error::Error for ModelError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			ModelError::Io(e) => Some(e),
			ModelError::Snapshot(e) => Some(e),
			_ => None,
		}
	}
}

impl From<io::Error> for ModelError {
	fn from(e: io::Error) -> Self {
		ModelError::Io(e)
	}
}

impl From<postcard::Error> for ModelError {
	fn from(e: postcard::Error) -> Self {
		ModelError::Snapshot(e)
	}
}
