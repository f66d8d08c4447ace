use {
	crate::{
		color::ColorTable,
		config::Config,
		default, legend,
		names::{self, NameTable},
		raster::{self, PngFile, Stats},
		tiles, Error, Result,
	},
	std::{io::ErrorKind, path::Path},
};

#[derive(Debug)]
pub struct Summary {
	pub width: usize,
	pub height: usize,
	pub countries: usize,
	pub stats: Stats,
}

/// Names for the legend; any failure leaves the legend with "Unknown" everywhere.
pub fn loadNames(path: &Path) -> NameTable {
	match names::load(path) {
		Ok(names) => {
			log::info!("{} country names loaded from {path:?}", names.len());
			names
		}
		Err(Error::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
			log::warn!("{path:?} not found. Country names won't be included.");
			default()
		}
		Err(err) => {
			log::warn!("failed to load country names: {err}");
			default()
		}
	}
}

/// Image, then legend. Nothing is written unless the tile files were found and the first
/// one yields a non-empty row.
pub fn run(config: &Config) -> Result<Summary> {
	let names = loadNames(&config.names);
	let tiles = tiles::discover(&config.inputDir)?;
	let first = &tiles[0].path;
	log::info!("Scanning first file for width...");
	let (width, height) = (tiles::countRecords(first)?, tiles.len());
	if width == 0 {
		return Err(Error::EmptyRaster(first.clone()));
	}
	log::info!("Detected dimensions → width={width}, height={height}");

	let colors = &mut ColorTable::default();
	let (_, stats) =
		raster::build(&tiles, width, config.checkpointInterval, colors, &mut PngFile(config.outputImage.clone()))?;
	if stats.malformed > 0 {
		log::info!("{} malformed records left as black pixels", stats.malformed);
	}
	log::info!("PNG saved as: {:?}", config.outputImage);

	legend::writeFile(&config.legend, colors, &names)?;
	log::info!("Legend saved as: {:?}", config.legend);
	Ok(Summary { width, height, countries: colors.len(), stats })
}
