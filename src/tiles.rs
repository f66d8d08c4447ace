use {
	crate::{Error, IoResultExt, Result},
	const_format::concatcp,
	regex::Regex,
	std::{
		fs::{self, File},
		io::{BufRead, BufReader},
		path::{Path, PathBuf},
	},
};

pub const FILE_PREFIX: &str = "tileY-";
pub const FILE_SUFFIX: &str = "-uncompressed.jsonl";
pub const FILE_GLOB: &str = concatcp!(FILE_PREFIX, "*", FILE_SUFFIX);
const FILE_REGEX: &str = concatcp!("^", FILE_PREFIX, r"(\d+)", r"-uncompressed\.jsonl$");

/// One input file, holding one image row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TileFile {
	pub y: u64,
	pub path: PathBuf,
}

impl TileFile {
	#[must_use]
	pub fn name(&self) -> String {
		self.path.file_name().map_or_else(String::new, |name| name.to_string_lossy().into_owned())
	}
}

/// Row index embedded in a tile file name, `None` if the name is not a tile file name.
#[must_use]
pub fn tileNumber(fileName: &str, pattern: &Regex) -> Option<u64> {
	pattern.captures(fileName)?.get(1)?.as_str().parse().ok()
}

/// Tile files of `dir` in ascending row order.
///
/// Names shaped like a tile file whose row index cannot be read are left out with a warning.
pub fn discover(dir: &Path) -> Result<Vec<TileFile>> {
	let pattern = Regex::new(FILE_REGEX).expect("tile file pattern compiles");
	let mut tiles = Vec::new();
	for entry in fs::read_dir(dir).atPath(dir)? {
		let entry = entry.atPath(dir)?;
		let path = entry.path();
		if !path.is_file() {
			continue;
		}
		let fileName = entry.file_name();
		let Some(fileName) = fileName.to_str() else { continue };
		match tileNumber(fileName, &pattern) {
			Some(y) => tiles.push(TileFile { y, path }),
			None if fileName.starts_with(FILE_PREFIX) && fileName.ends_with(FILE_SUFFIX) => {
				log::warn!("{path:?}: no usable row index in name, skipped");
			}
			None => {}
		}
	}
	if tiles.is_empty() {
		return Err(Error::NoTileFiles(dir.into()));
	}
	// (y, path) ordering keeps equal indices like tileY-1 and tileY-01 in a fixed order
	tiles.sort_unstable();
	Ok(tiles)
}

/// Number of lines in the file; a last line without a trailing newline still counts.
pub fn countRecords(path: &Path) -> Result<usize> {
	let mut reader = BufReader::new(File::open(path).atPath(path)?);
	let (mut count, mut lastByte) = (0, None);
	loop {
		let buffer = reader.fill_buf().atPath(path)?;
		let Some(&last) = buffer.last() else { break };
		count += memchr::memchr_iter(b'\n', buffer).count();
		lastByte = Some(last);
		let len = buffer.len();
		reader.consume(len);
	}
	Ok(count + usize::from(lastByte.map_or(false, |byte| byte != b'\n')))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn pattern() -> Regex {
		Regex::new(FILE_REGEX).unwrap()
	}

	fn touch(dir: &Path, name: &str, contents: &str) {
		fs::write(dir.join(name), contents).unwrap();
	}

	#[test]
	fn glob_describes_the_file_names() {
		assert_eq!(FILE_GLOB, "tileY-*-uncompressed.jsonl");
	}

	#[test]
	fn tile_number_from_name() {
		let pattern = &pattern();
		assert_eq!(tileNumber("tileY-0-uncompressed.jsonl", pattern), Some(0));
		assert_eq!(tileNumber("tileY-2048-uncompressed.jsonl", pattern), Some(2048));
		assert_eq!(tileNumber("tileY-x-uncompressed.jsonl", pattern), None);
		assert_eq!(tileNumber("tileY-3-uncompressed.json", pattern), None);
		assert_eq!(tileNumber("tileY-3-uncompressed.jsonl.bak", pattern), None);
		assert_eq!(tileNumber("tileY-99999999999999999999999-uncompressed.jsonl", pattern), None);
	}

	#[test]
	fn sorts_numerically_not_by_listing() {
		let dir = tempfile::tempdir().unwrap();
		for y in [2, 0, 10, 1] {
			touch(dir.path(), &format!("tileY-{y}-uncompressed.jsonl"), "{}\n");
		}
		let ys: Vec<u64> = discover(dir.path()).unwrap().iter().map(|tile| tile.y).collect();
		assert_eq!(ys, [0, 1, 2, 10]);
	}

	#[test]
	fn ignores_other_files_and_unindexed_names() {
		let dir = tempfile::tempdir().unwrap();
		touch(dir.path(), "tileY-1-uncompressed.jsonl", "{}\n");
		touch(dir.path(), "tileY-abc-uncompressed.jsonl", "{}\n");
		touch(dir.path(), "tileX-0-uncompressed.jsonl", "{}\n");
		touch(dir.path(), "notes.txt", "");
		fs::create_dir(dir.path().join("tileY-0-uncompressed.jsonl")).unwrap();
		let tiles = discover(dir.path()).unwrap();
		assert_eq!(tiles.len(), 1);
		assert_eq!(tiles[0].name(), "tileY-1-uncompressed.jsonl");
	}

	#[test]
	fn no_tile_files_is_fatal() {
		let dir = tempfile::tempdir().unwrap();
		touch(dir.path(), "readme.md", "");
		assert!(matches!(discover(dir.path()), Err(Error::NoTileFiles(_))));
	}

	#[test]
	fn missing_directory_is_fatal() {
		let dir = tempfile::tempdir().unwrap();
		assert!(matches!(discover(&dir.path().join("sorted")), Err(Error::Io { .. })));
	}

	#[test]
	fn counts_lines_with_and_without_final_newline() {
		let dir = tempfile::tempdir().unwrap();
		for (contents, expected) in [("", 0), ("a\n", 1), ("a\nb", 2), ("a\nb\nc\n", 3), ("\n\n", 2)] {
			touch(dir.path(), "f", contents);
			assert_eq!(countRecords(&dir.path().join("f")).unwrap(), expected, "{contents:?}");
		}
	}
}
