use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::path::Path;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::random::UniformSource;
use super::window_stats::WindowStatsTable;
use crate::config::ModelConfig;
use crate::error::{ModelError, Result};
use crate::io::read_corpus;

/// Fixed-order character-level Markov model.
///
/// The `LanguageModel` maps every window (the `window_length` characters
/// preceding a position in the corpus) to the statistics of the characters
/// that followed it, and generates text by repeatedly sampling from them.
///
/// # Responsibilities
/// - Build the window tables from a corpus in a single pass
/// - Normalize every table once the corpus is exhausted
/// - Generate text from a seed, one weighted draw per character
///
/// # Invariants
/// - `window_length` is always >= 1
/// - Every key in `windows` is exactly `window_length` characters long
/// - Every table is non-empty and normalized once training returns
/// - The mapping is written by training only; generation just reads it
pub struct LanguageModel<R: UniformSource = StdRng> {
	/// Number of preceding characters used as context.
	window_length: usize,

	/// Mapping from a window to the characters observed right after it.
	pub(crate) windows: HashMap<String, WindowStatsTable>,

	/// Set once a corpus (or snapshot) has populated the model.
	pub(crate) trained: bool,

	/// Uniform draws used for sampling.
	source: R,
}

impl LanguageModel<StdRng> {
	/// Creates an untrained model seeded from OS entropy.
	/// Repeated generations produce different texts.
	///
	/// # Errors
	/// Returns an error if `window_length == 0`.
	pub fn new(window_length: usize) -> Result<Self> {
		Self::with_source(window_length, StdRng::from_os_rng())
	}

	/// Creates an untrained model with a deterministic random source.
	/// The same seed, corpus and generation arguments always yield the same text.
	///
	/// # Errors
	/// Returns an error if `window_length == 0`.
	pub fn with_seed(window_length: usize, seed: u64) -> Result<Self> {
		Self::with_source(window_length, StdRng::seed_from_u64(seed))
	}

	/// Creates an untrained model from a `ModelConfig`.
	pub fn from_config(config: &ModelConfig) -> Result<Self> {
		config.validate()?;
		match config.seed {
			Some(seed) => Self::with_seed(config.window_length, seed),
			None => Self::new(config.window_length),
		}
	}
}

impl<R: UniformSource> LanguageModel<R> {
	/// Creates an untrained model drawing from the given source.
	///
	/// # Errors
	/// Returns an error if `window_length == 0`.
	pub fn with_source(window_length: usize, source: R) -> Result<Self> {
		if window_length == 0 {
			return Err(ModelError::InvalidWindowLength(window_length));
		}
		Ok(Self {
			window_length,
			windows: HashMap::new(),
			trained: false,
			source,
		})
	}

	/// Returns the Markov order of the model.
	pub fn window_length(&self) -> usize {
		self.window_length
	}

	/// Returns the number of distinct windows observed during training.
	pub fn window_count(&self) -> usize {
		self.windows.len()
	}

	/// Returns `true` once a corpus or a snapshot has been loaded.
	pub fn is_trained(&self) -> bool {
		self.trained
	}

	/// Returns the statistics of the characters observed after `window`.
	pub fn table(&self, window: &str) -> Option<&WindowStatsTable> {
		self.windows.get(window)
	}

	/// Iterates over all windows and their tables, in no particular order.
	pub fn windows(&self) -> impl Iterator<Item = (&str, &WindowStatsTable)> {
		self.windows.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Builds the model from a stream of characters.
	///
	/// - The first `window_length` characters form the initial window.
	/// - Each following character is recorded in the table of the current
	///   window, then the window slides by one character.
	/// - Every table is normalized once the stream is exhausted.
	///
	/// The model is only updated if the whole pass succeeds.
	///
	/// A corpus exactly one window long succeeds without observing any window:
	/// the model is then trained but empty, and further training is refused.
	///
	/// # Errors
	/// - `AlreadyTrained` if a previous `train` (or snapshot load) succeeded,
	///   whether or not it populated the mapping.
	/// - `InsufficientInput` if the corpus is shorter than one window.
	pub fn train<I>(&mut self, corpus: I) -> Result<()>
	where
		I: IntoIterator<Item = char>,
	{
		if self.trained {
			return Err(ModelError::AlreadyTrained);
		}

		let mut chars = corpus.into_iter();
		let mut window: VecDeque<char> = chars.by_ref().take(self.window_length).collect();
		if window.len() < self.window_length {
			return Err(ModelError::InsufficientInput {
				window_length: self.window_length,
				available: window.len(),
			});
		}

		let mut windows: HashMap<String, WindowStatsTable> = HashMap::new();
		let mut consumed = window.len();
		for c in chars {
			let key: String = window.iter().collect();
			windows.entry(key).or_default().record_occurrence(c);

			window.pop_front();
			window.push_back(c);
			consumed += 1;
		}

		for table in windows.values_mut() {
			table.normalize()?;
		}

		info!(
			"trained order-{} model: {} characters, {} windows",
			self.window_length,
			consumed,
			windows.len()
		);
		self.windows = windows;
		self.trained = true;
		Ok(())
	}

	/// Reads a corpus file and trains the model on its characters.
	pub fn train_file<P: AsRef<Path>>(&mut self, filename: P) -> Result<()> {
		let corpus = read_corpus(filename)?;
		self.train(corpus.chars())
	}

	/// Generates text from the trained statistics.
	///
	/// # Parameters
	/// - `seed_text`: its last `window_length` characters form the first window.
	/// - `target_length`: number of characters to reach, window included.
	///
	/// # Returns
	/// - `seed_text` unchanged if it is shorter than one window.
	/// - Otherwise the seed's trailing window followed by sampled characters.
	///   Generation stops early when the current window was never observed,
	///   so the result holds between `window_length` and `target_length` characters.
	///
	/// # Notes
	/// - Text preceding the trailing window is not part of the output.
	/// - UTF-8 safe: lengths are counted in characters.
	///
	/// # Errors
	/// Returns `InvalidDraw` if the random source yields a value outside `[0, 1)`.
	pub fn generate(&mut self, seed_text: &str, target_length: usize) -> Result<String> {
		let seed: Vec<char> = seed_text.chars().collect();
		if seed.len() < self.window_length {
			return Ok(seed_text.to_owned());
		}

		let mut window: String = seed[seed.len() - self.window_length..].iter().collect();
		let mut output = window.clone();
		let mut output_length = self.window_length;

		while output_length < target_length {
			let Some(table) = self.windows.get(&window) else {
				debug!("window {:?} never observed, stopping at {} characters", window, output_length);
				break;
			};

			let next_char = table.sample_character(self.source.next_uniform())?;
			output.push(next_char);
			output_length += 1;

			window.remove(0);
			window.push(next_char);
		}

		Ok(output)
	}
}

/// One line per window: `<window> : <table>`, windows sorted.
impl<R: UniformSource> fmt::Display for LanguageModel<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut keys: Vec<&String> = self.windows.keys().collect();
		keys.sort();
		for key in keys {
			writeln!(f, "{} : {}", key, self.windows[key])?;
		}
		Ok(())
	}
}
