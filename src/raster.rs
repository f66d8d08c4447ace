use {
	crate::{color::ColorTable, color::Rgb, tiles::TileFile, Error, IoResultExt, Result},
	png::{BitDepth, ColorType},
	serde_json::{Map, Value},
	std::{
		fs::File,
		io::{BufRead, BufReader, BufWriter, Write},
		path::{Path, PathBuf},
	},
};

const CHANNELS: usize = 3;

/// RGB image, black until painted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
	pub width: usize,
	pub height: usize,
	pub data: Vec<u8>,
}

impl Raster {
	#[must_use]
	pub fn fromWidthHeight(width: usize, height: usize) -> Self {
		Self { width, height, data: vec![0; width * height * CHANNELS] }
	}

	pub fn putpixel(&mut self, x: usize, y: usize, color: Rgb) {
		assert!(x < self.width && y < self.height, "({x}, {y}) outside {}x{}", self.width, self.height);
		let i = (y * self.width + x) * CHANNELS;
		self.data[i..i + CHANNELS].copy_from_slice(&color);
	}

	#[must_use]
	pub fn pixel(&self, x: usize, y: usize) -> Rgb {
		let i = (y * self.width + x) * CHANNELS;
		[self.data[i], self.data[i + 1], self.data[i + 2]]
	}

	pub fn writePng(&self, writer: impl Write) -> Result<(), png::EncodingError> {
		let mut png = png::Encoder::new(writer, self.width as _, self.height as _);
		png.set_color(ColorType::Rgb);
		png.set_depth(BitDepth::Eight);
		let mut writer = png.write_header()?;
		writer.write_image_data(&self.data)?;
		writer.finish()
	}
}

/// Where partial and final rasters go.
pub trait RasterSink {
	fn save(&mut self, raster: &Raster) -> Result<()>;
}

/// Replaces one PNG file on every save. The image is written next to it first and renamed
/// over it, so the file on disk is always a whole image.
pub struct PngFile(pub PathBuf);

impl RasterSink for PngFile {
	fn save(&mut self, raster: &Raster) -> Result<()> {
		let path = self.0.as_path();
		let dir = match path.parent() {
			Some(dir) if !dir.as_os_str().is_empty() => dir,
			_ => Path::new("."),
		};
		let mut partial = tempfile::NamedTempFile::new_in(dir).atPath(dir)?;
		{
			let file = &mut BufWriter::new(partial.as_file_mut());
			raster.writePng(&mut *file).map_err(|source| Error::Png { path: path.into(), source })?;
			file.flush().atPath(path)?;
		}
		partial.persist(path).map_err(|err| err.error).atPath(path)?;
		Ok(())
	}
}

/// Country id of one input line, `None` if the line is not a JSON object with an
/// unsigned integer (or absent) `countryId`. A repeated key keeps its last value.
#[must_use]
pub fn parseRecord(line: &[u8]) -> Option<u64> {
	let record: Map<String, Value> = serde_json::from_slice(line).ok()?;
	match record.get("countryId") {
		None | Some(Value::Null) => Some(0),
		Some(countryId) => countryId.as_u64(),
	}
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
	pub records: usize,
	pub malformed: usize,
	pub overflowing: usize,
	pub checkpoints: usize,
}

/// Paints one row per tile file and one pixel per line, saving the partial raster to `sink`
/// after every `checkpointInterval` rows (`0` never) and the whole one at the end.
pub fn build(
	tiles: &[TileFile],
	width: usize,
	checkpointInterval: usize,
	colors: &mut ColorTable,
	sink: &mut impl RasterSink,
) -> Result<(Raster, Stats)> {
	let height = tiles.len();
	if u32::try_from(width).is_err() || u32::try_from(height).is_err() {
		return Err(Error::RasterTooLarge { width, height });
	}
	let (mut raster, mut stats) = (Raster::fromWidthHeight(width, height), Stats::default());
	for (y, tile) in tiles.iter().enumerate() {
		let path = tile.path.as_path();
		let reader = BufReader::new(File::open(path).atPath(path)?);
		let mut overflowing = 0;
		for (x, line) in reader.split(b'\n').enumerate() {
			let line = line.atPath(path)?;
			if x >= width {
				overflowing += 1;
				continue;
			}
			match parseRecord(&line) {
				Some(countryId) => {
					raster.putpixel(x, y, colors.colorOf(countryId));
					stats.records += 1;
				}
				None => stats.malformed += 1,
			}
		}
		if overflowing > 0 {
			log::warn!("{path:?}: {overflowing} records past width {width} ignored");
			stats.overflowing += overflowing;
		}
		log::info!("Processed {}/{height} files: {}", y + 1, tile.name());
		if checkpointInterval != 0 && (y + 1) % checkpointInterval == 0 {
			log::debug!("checkpoint after {} rows", y + 1);
			sink.save(&raster)?;
			stats.checkpoints += 1;
		}
	}
	sink.save(&raster)?;
	Ok((raster, stats))
}
