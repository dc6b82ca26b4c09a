use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Reads a whole corpus file into memory.
///
/// Unlike line-based readers, every character is kept as-is,
/// including line terminators.
pub fn read_corpus<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Builds the snapshot path for a corpus trained with a given window length.
///
/// The snapshot sits beside the corpus and encodes the window length, so
/// models of different orders never share a cache:
/// `data/input.txt` + `3` → `data/input.w3.bin`
pub fn snapshot_path<P: AsRef<Path>>(corpus_path: P, window_length: usize) -> io::Result<PathBuf> {
	let corpus_path = corpus_path.as_ref();
	match corpus_path.file_stem() {
		Some(stem) => {
			let mut name = stem.to_os_string();
			name.push(format!(".w{window_length}.bin"));
			Ok(corpus_path.with_file_name(name))
		}
		None => Err(io::Error::new(io::ErrorKind::InvalidInput, "Corpus path has no filename")),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn snapshot_path_sits_next_to_corpus() {
		let path = snapshot_path("data/input.txt", 3).unwrap();
		assert_eq!(path, PathBuf::from("data/input.w3.bin"));
	}

	#[test]
	fn snapshot_path_keeps_dotted_stems() {
		let path = snapshot_path("corpus.v2.txt", 5).unwrap();
		assert_eq!(path, PathBuf::from("corpus.v2.w5.bin"));
	}

	#[test]
	fn snapshot_path_without_filename_fails() {
		assert!(snapshot_path("/", 2).is_err());
	}

	#[test]
	fn read_corpus_keeps_line_breaks() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("corpus.txt");
		std::fs::write(&path, "ab\r\ncd\n").unwrap();
		assert_eq!(read_corpus(&path).unwrap(), "ab\r\ncd\n");
	}
}
