use {
	crate::{
		color::ColorTable,
		names::{self, NameTable},
		IoResultExt, Result,
	},
	std::{
		fs::File,
		io::{self, BufWriter, Write},
		path::Path,
	},
};

pub const HEADER: &str = "countryId,countryName,RGB";

/// One `id,name,(r, g, b)` line per color handed out, ids ascending.
pub fn write(mut writer: impl Write, colors: &ColorTable, names: &NameTable) -> io::Result<()> {
	writeln!(writer, "{HEADER}")?;
	for (&countryId, &[r, g, b]) in colors {
		writeln!(writer, "{countryId},{},({r}, {g}, {b})", names::nameOf(names, countryId))?;
	}
	writer.flush()
}

pub fn writeFile(path: &Path, colors: &ColorTable, names: &NameTable) -> Result<()> {
	write(BufWriter::new(File::create(path).atPath(path)?), colors, names).atPath(path)
}
