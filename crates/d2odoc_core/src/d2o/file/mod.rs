use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use std::sync::Arc;

use crate::d2o::{ByteReader, ClassTable, D2oHeader, DecodeOptions, DecodeTables, IndexTable, ObjectValue, Result, decode_all, decode_by_id};

/// Opened D2O container: located header, index table, class schemas, and the byte source.
///
/// Tables are built once at open and never change. Every decode call moves the source
/// cursor, so one instance serves one caller at a time; use [`D2oFile::with_source`] to get
/// an independent handle over another source that shares the tables.
pub struct D2oFile<R> {
	/// Located header.
	pub header: D2oHeader,
	index: Arc<IndexTable>,
	classes: Arc<ClassTable>,
	reader: ByteReader<R>,
}

impl D2oFile<BufReader<File>> {
	/// Open and parse a container from disk.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		Self::from_source(BufReader::new(File::open(path)?))
	}
}

impl<R: Read + Seek> D2oFile<R> {
	/// Parse header, index table, and class table from `source`.
	pub fn from_source(source: R) -> Result<Self> {
		let mut reader = ByteReader::new(source)?;
		let header = D2oHeader::parse(&mut reader)?;
		let index = IndexTable::parse(&mut reader, &header)?;
		let classes = ClassTable::parse(&mut reader)?;

		Ok(Self {
			header,
			index: Arc::new(index),
			classes: Arc::new(classes),
			reader,
		})
	}

	/// Handle over `source`, which must hold the same container bytes, reusing these tables.
	pub fn with_source<S: Read + Seek>(&self, source: S) -> Result<D2oFile<S>> {
		Ok(D2oFile {
			header: self.header,
			index: Arc::clone(&self.index),
			classes: Arc::clone(&self.classes),
			reader: ByteReader::new(source)?,
		})
	}

	/// Object id to record offset table.
	pub fn index(&self) -> &IndexTable {
		&self.index
	}

	/// Class schema table.
	pub fn classes(&self) -> &ClassTable {
		&self.classes
	}

	/// Decode every record with default options.
	pub fn objects(&mut self) -> Result<Vec<ObjectValue>> {
		self.objects_with(&DecodeOptions::default())
	}

	/// Decode every record by sequential scan.
	pub fn objects_with(&mut self, opt: &DecodeOptions) -> Result<Vec<ObjectValue>> {
		let tables = DecodeTables {
			index: &self.index,
			classes: &self.classes,
		};
		decode_all(&mut self.reader, tables, self.header.records_offset(), opt)
	}

	/// Decode one object by id with default options.
	pub fn object(&mut self, id: i32) -> Result<ObjectValue> {
		self.object_with(id, &DecodeOptions::default())
	}

	/// Decode one object by id.
	pub fn object_with(&mut self, id: i32, opt: &DecodeOptions) -> Result<ObjectValue> {
		let tables = DecodeTables {
			index: &self.index,
			classes: &self.classes,
		};
		decode_by_id(&mut self.reader, tables, id, opt)
	}

	/// Decode every indexed object by id, in ascending id order.
	pub fn objects_by_id(&mut self, opt: &DecodeOptions) -> Result<Vec<(i32, ObjectValue)>> {
		let ids = self.index.ids();
		let mut out = Vec::with_capacity(ids.len());
		for id in ids {
			out.push((id, self.object_with(id, opt)?));
		}
		Ok(out)
	}
}

#[cfg(test)]
mod tests;
