use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use markov_gen_core::{LanguageModel, ModelConfig};

/// How the model's random source is seeded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
	/// Entropy-seeded: every run produces a different text
	Random,
	/// Fixed seed: every run produces the same text
	Fixed,
}

/// Trains a character-level Markov model on a corpus and prints generated text
#[derive(Debug, Parser)]
#[command(name = "markov-gen")]
struct Args {
	/// Number of preceding characters used as context
	window_length: usize,

	/// Text whose last `window_length` characters start the generation
	initial_text: String,

	/// Length of the generated text, in characters
	length: usize,

	/// Seeding mode
	#[arg(value_enum)]
	mode: Mode,

	/// Corpus file
	corpus: PathBuf,

	/// Seed used in fixed mode
	#[arg(long, default_value_t = ModelConfig::DEFAULT_SEED)]
	seed: u64,

	/// Load or write a binary snapshot next to the corpus
	#[arg(long)]
	cache: bool,

	/// Print the trained windows instead of generating
	#[arg(long)]
	dump: bool,

	/// Log level (trace, debug, info, warn, error)
	#[arg(long, default_value = "warn")]
	log_level: log::LevelFilter,
}

impl Args {
	fn model_config(&self) -> ModelConfig {
		match self.mode {
			Mode::Random => ModelConfig::random(self.window_length),
			Mode::Fixed => ModelConfig::seeded(self.window_length, self.seed),
		}
	}
}

fn main() -> Result<()> {
	let args = Args::parse();

	// RUST_LOG takes precedence over --log-level
	let mut logger_builder = env_logger::Builder::new();
	logger_builder.filter_level(args.log_level);
	logger_builder.parse_default_env();
	logger_builder.init();

	let mut model = LanguageModel::from_config(&args.model_config()).context("Invalid model configuration")?;

	let training = if args.cache {
		model.train_file_cached(&args.corpus)
	} else {
		model.train_file(&args.corpus)
	};
	training.with_context(|| format!("Failed to train on {}", args.corpus.display()))?;
	info!("model ready: {} windows", model.window_count());

	if args.dump {
		print!("{model}");
		return Ok(());
	}

	let text = model
		.generate(&args.initial_text, args.length)
		.context("Generation failed")?;
	println!("{text}");

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn positional_arguments_follow_usage() {
		let args = Args::try_parse_from(["markov-gen", "3", "Hello", "100", "fixed", "corpus.txt"]).unwrap();
		assert_eq!(args.window_length, 3);
		assert_eq!(args.initial_text, "Hello");
		assert_eq!(args.length, 100);
		assert_eq!(args.corpus, PathBuf::from("corpus.txt"));
		assert_eq!(args.model_config(), ModelConfig::seeded(3, ModelConfig::DEFAULT_SEED));
	}

	#[test]
	fn random_mode_has_no_seed() {
		let args = Args::try_parse_from(["markov-gen", "2", "ab", "10", "random", "c.txt", "--seed", "9"]).unwrap();
		assert_eq!(args.model_config().seed, None);
	}

	#[test]
	fn log_level_is_parsed() {
		let args = Args::try_parse_from(["markov-gen", "2", "ab", "10", "fixed", "c.txt", "--log-level", "debug"]).unwrap();
		assert_eq!(args.log_level, log::LevelFilter::Debug);
		assert!(Args::try_parse_from(["markov-gen", "2", "ab", "10", "fixed", "c.txt", "--log-level", "loud"]).is_err());
	}

	#[test]
	fn unknown_mode_is_rejected() {
		assert!(Args::try_parse_from(["markov-gen", "2", "ab", "10", "sometimes", "c.txt"]).is_err());
	}
}
