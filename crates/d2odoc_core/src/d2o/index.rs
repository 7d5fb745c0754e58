use std::collections::{HashMap, HashSet};
use std::io::{Read, Seek};

use tracing::{debug, warn};

use crate::d2o::header::resolve_offset;
use crate::d2o::{ByteReader, D2oError, D2oHeader, Result};

const ENTRY_SIZE: i32 = 8;
const MAX_PREALLOC: usize = 1 << 16;

/// Object id to absolute record offset mapping.
#[derive(Debug, Clone, Default)]
pub struct IndexTable {
	offsets: HashMap<i32, u64>,
	duplicates: usize,
}

impl IndexTable {
	/// Decode the index block at `header.index_offset`.
	///
	/// Reads `len / 8` entries and leaves the reader right after the last one, where the class
	/// table starts. Bytes of a length that is not a multiple of 8 are not skipped.
	/// A repeated id keeps the offset of its last occurrence.
	pub fn parse<R: Read + Seek>(reader: &mut ByteReader<R>, header: &D2oHeader) -> Result<Self> {
		reader.goto(header.index_offset)?;
		let at = reader.position();
		let len = reader.read_i32()?;
		if len < 0 {
			return Err(D2oError::NegativeCount {
				what: "index table length",
				count: len,
				at,
			});
		}

		let count = len / ENTRY_SIZE;
		let mut table = Self {
			offsets: HashMap::with_capacity((count as usize).min(MAX_PREALLOC)),
			duplicates: 0,
		};
		for _ in 0..count {
			let id = reader.read_i32()?;
			let relative = reader.read_i32()?;
			let offset = resolve_offset("index entry", header.header_offset, relative)?;
			if table.offsets.insert(id, offset).is_some() {
				table.duplicates += 1;
				warn!(id, offset, "duplicate index id, keeping last offset");
			}
		}

		let trailing = len % ENTRY_SIZE;
		if trailing != 0 {
			warn!(len, trailing, "index table length is not a multiple of 8");
		}

		debug!(entries = table.len(), duplicates = table.duplicates, "index table loaded");
		Ok(table)
	}

	/// Number of distinct ids.
	pub fn len(&self) -> usize {
		self.offsets.len()
	}

	/// Whether the table has no entries.
	pub fn is_empty(&self) -> bool {
		self.offsets.is_empty()
	}

	/// Number of entries that overwrote an earlier entry with the same id.
	pub fn duplicates(&self) -> usize {
		self.duplicates
	}

	/// Absolute record offset for `id`.
	pub fn get(&self, id: i32) -> Option<u64> {
		self.offsets.get(&id).copied()
	}

	/// Set of all indexed record offsets.
	pub fn offset_set(&self) -> HashSet<u64> {
		self.offsets.values().copied().collect()
	}

	/// All ids in ascending order.
	pub fn ids(&self) -> Vec<i32> {
		let mut ids: Vec<_> = self.offsets.keys().copied().collect();
		ids.sort_unstable();
		ids
	}
}

#[cfg(test)]
mod tests;
