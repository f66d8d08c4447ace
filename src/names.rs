use {
	crate::{Error, IoResultExt, Result},
	std::{collections::HashMap, fs::File, io::Read, path::Path},
};

/// Country id → display name.
pub type NameTable = HashMap<u64, String>;

pub const UNKNOWN: &str = "Unknown";

/// Reads a CSV whose header carries an id-like and a name-like column.
///
/// Columns are picked by case-insensitive substring (`"id"`, `"name"`), first match in
/// header order. Rows whose id does not parse as an integer are skipped.
pub fn load(path: &Path) -> Result<NameTable> {
	fromReader(File::open(path).atPath(path)?, path)
}

pub fn fromReader(reader: impl Read, path: &Path) -> Result<NameTable> {
	let csvError = |source| Error::Csv { path: path.into(), source };
	let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
	let (idColumn, nameColumn) = {
		let headers = reader.headers().map_err(csvError)?;
		let column = |needle: &str| headers.iter().position(|header| header.to_lowercase().contains(needle));
		match (column("id"), column("name")) {
			(Some(idColumn), Some(nameColumn)) => (idColumn, nameColumn),
			_ => return Err(Error::NameColumnsMissing(path.into())),
		}
	};
	let mut names = NameTable::new();
	for record in reader.records() {
		let record = record.map_err(csvError)?;
		let (Some(id), Some(name)) = (record.get(idColumn), record.get(nameColumn)) else {
			continue;
		};
		if let Ok(id) = id.trim().parse() {
			names.insert(id, name.to_owned());
		}
	}
	Ok(names)
}

#[must_use]
pub fn nameOf(names: &NameTable, countryId: u64) -> &str {
	names.get(&countryId).map_or(UNKNOWN, String::as_str)
}

#[cfg(test)]
mod tests {
	use {super::*, std::io::ErrorKind};

	fn parse(csv: &str) -> Result<NameTable> {
		fromReader(csv.as_bytes(), Path::new("names.csv"))
	}

	#[test]
	fn reads_id_and_name_columns() {
		let names = parse("countryId,countryName\n1,France\n2,\"Korea, Republic of\"\n").unwrap();
		assert_eq!(names.len(), 2);
		assert_eq!(nameOf(&names, 1), "France");
		assert_eq!(nameOf(&names, 2), "Korea, Republic of");
		assert_eq!(nameOf(&names, 3), UNKNOWN);
	}

	#[test]
	fn columns_match_case_insensitively_in_any_order() {
		let names = parse("Code,NAME,Country_ID\nfr,France,1\n").unwrap();
		assert_eq!(nameOf(&names, 1), "France");
	}

	#[test]
	fn first_matching_column_wins() {
		let names = parse("id,name,altId,nickname\n1,Germany,9,Deutschland\n").unwrap();
		assert_eq!(nameOf(&names, 1), "Germany");
		assert_eq!(nameOf(&names, 9), UNKNOWN);
	}

	#[test]
	fn bad_ids_and_short_rows_are_skipped() {
		let names = parse("id,name\nx,Nowhere\n 4 ,Spain\n5\n-3,Negative\n6,Italy\n").unwrap();
		assert_eq!(names.len(), 2);
		assert_eq!(nameOf(&names, 4), "Spain");
		assert_eq!(nameOf(&names, 6), "Italy");
	}

	#[test]
	fn header_without_name_column_is_an_error() {
		assert!(matches!(parse("id,label\n1,France\n"), Err(Error::NameColumnsMissing(_))));
		assert!(matches!(parse(""), Err(Error::NameColumnsMissing(_))));
	}

	#[test]
	fn missing_file_reports_not_found() {
		let dir = tempfile::tempdir().unwrap();
		match load(&dir.path().join("absent.csv")) {
			Err(Error::Io { source, .. }) => assert_eq!(source.kind(), ErrorKind::NotFound),
			other => panic!("{other:?}"),
		}
	}
}
