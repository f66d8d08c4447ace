use std::collections::{btree_map, BTreeMap};

pub type Rgb = [u8; 3];

pub const MULTIPLIERS: [u64; 3] = [97, 57, 31];

/// Deterministic color of a country id. Distinct ids may share a color.
#[must_use]
pub fn colorOf(countryId: u64) -> Rgb {
	// exact modulo 256 even when the product wraps, since 256 divides 2^64
	MULTIPLIERS.map(|multiplier| (countryId.wrapping_mul(multiplier) % 256) as u8)
}

/// Colors handed out so far, keyed by country id in ascending order.
#[derive(Default, Debug)]
pub struct ColorTable(BTreeMap<u64, Rgb>);

impl ColorTable {
	pub fn colorOf(&mut self, countryId: u64) -> Rgb {
		*self.0.entry(countryId).or_insert_with(|| colorOf(countryId))
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> btree_map::Iter<'_, u64, Rgb> {
		self.0.iter()
	}
}

impl<'a> IntoIterator for &'a ColorTable {
	type Item = (&'a u64, &'a Rgb);
	type IntoIter = btree_map::Iter<'a, u64, Rgb>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
