use {
	crate::{Error, IoResultExt, Result},
	serde::Deserialize,
	std::{
		fs,
		io::ErrorKind,
		path::{Path, PathBuf},
	},
};

pub const CONFIG_PATH: &str = "wplace_map.toml";

pub const INPUT_DIR: &str = "sorted";
pub const OUTPUT_IMAGE: &str = "output_map.png";
pub const LEGEND: &str = "country_color_map.txt";
pub const NAMES: &str = "countryid_to_name.csv";

/// Rows filled between two checkpoint saves of the partial image.
pub const CHECKPOINT_INTERVAL: usize = 50;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub inputDir: PathBuf,
	pub outputImage: PathBuf,
	pub legend: PathBuf,
	pub names: PathBuf,

	/// `0` turns checkpoints off.
	pub checkpointInterval: usize,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			inputDir: INPUT_DIR.into(),
			outputImage: OUTPUT_IMAGE.into(),
			legend: LEGEND.into(),
			names: NAMES.into(),
			checkpointInterval: CHECKPOINT_INTERVAL,
		}
	}
}

impl Config {
	/// Built-in defaults, overridden by whatever keys the TOML file at `path` sets.
	/// A missing file just means defaults.
	pub fn load(path: &Path) -> Result<Self> {
		let text = match fs::read_to_string(path) {
			Err(err) if err.kind() == ErrorKind::NotFound => {
				log::debug!("{path:?} not found, using built-in configuration");
				return Ok(Self::default());
			}
			result => result.atPath(path)?,
		};
		log::debug!("configuration read from {path:?}");
		Self::fromToml(&text).map_err(|source| Error::Config { path: path.into(), source })
	}

	/// Like [`Config::load`], but a file that cannot be read or parsed only costs a warning
	/// and the built-in defaults.
	pub fn loadOrDefault(path: &Path) -> Self {
		Self::load(path).unwrap_or_else(|err| {
			log::warn!("ignoring configuration: {err}");
			Self::default()
		})
	}

	pub fn fromToml(text: &str) -> Result<Self, toml::de::Error> {
		toml::from_str(text)
	}
}
