#![warn(clippy::pedantic, elided_lifetimes_in_paths, explicit_outlives_requirements)]
#![allow(non_snake_case)]

pub mod color;
pub mod config;
pub mod legend;
pub mod names;
pub mod pipeline;
pub mod raster;
pub mod tiles;

use std::{io, path::PathBuf};

#[inline(always)]
pub fn default<T: Default>() -> T {
	T::default()
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("{path:?}: {source}")]
	Io { path: PathBuf, source: io::Error },

	#[error("no files matching {glob} found in {0:?}", glob = tiles::FILE_GLOB)]
	NoTileFiles(PathBuf),

	#[error("{0:?}: first tile file holds no records, raster would be empty")]
	EmptyRaster(PathBuf),

	#[error("raster {width}x{height} does not fit a PNG image")]
	RasterTooLarge { width: usize, height: usize },

	#[error("{path:?}: {source}")]
	Csv { path: PathBuf, source: csv::Error },

	#[error("{0:?}: header has no id-like and name-like columns")]
	NameColumnsMissing(PathBuf),

	#[error("{path:?}: {source}")]
	Png { path: PathBuf, source: png::EncodingError },

	#[error("{path:?}: {source}")]
	Config { path: PathBuf, source: toml::de::Error },
}

pub(crate) trait IoResultExt<T> {
	fn atPath(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
	fn atPath(self, path: impl Into<PathBuf>) -> Result<T> {
		self.map_err(|source| Error::Io { path: path.into(), source })
	}
}
