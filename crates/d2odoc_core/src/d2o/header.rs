use std::io::{Read, Seek};

use tracing::debug;

use crate::d2o::{ByteReader, D2oError, Result};

/// Marker opening every D2O container.
pub const D2O_MAGIC: [u8; 3] = *b"D2O";
/// Marker opening the optional outer wrapper block.
pub const AKSD_MAGIC: &str = "AKSD";

/// Container variant detected at the start of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
	/// The source starts directly with `D2O`.
	Plain,
	/// The source starts with an `AKSD` block whose opaque blob precedes the `D2O` marker.
	Aksd {
		/// Wrapper format version.
		version: i16,
		/// Absolute offset of the wrapped blob.
		blob_offset: u64,
		/// Declared blob length (the relative skip applied before `D2O`).
		blob_len: i32,
	},
}

impl ContainerKind {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Plain => "plain",
			Self::Aksd { .. } => "aksd",
		}
	}
}

/// Located D2O preamble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct D2oHeader {
	/// Detected container variant.
	pub kind: ContainerKind,
	/// Absolute offset of the `D2O` marker; every stored offset is relative to it.
	pub header_offset: u64,
	/// Absolute offset of the index table.
	pub index_offset: u64,
}

impl D2oHeader {
	/// Bytes between the `D2O` marker and the first record: marker plus index offset field.
	pub const PREAMBLE_SIZE: u64 = 7;

	/// Absolute offset of the first object record.
	pub fn records_offset(&self) -> u64 {
		self.header_offset + Self::PREAMBLE_SIZE
	}

	/// Detect the container variant from offset 0 and read the index table offset.
	///
	/// Leaves the reader positioned right after the preamble.
	pub fn parse<R: Read + Seek>(reader: &mut ByteReader<R>) -> Result<Self> {
		reader.goto(0)?;
		let (kind, header_offset) = detect_container(reader)?;
		let relative = reader.read_i32()?;
		let index_offset = resolve_offset("index table", header_offset, relative)?;

		debug!(kind = kind.as_str(), header_offset, index_offset, "d2o header detected");
		Ok(Self {
			kind,
			header_offset,
			index_offset,
		})
	}
}

fn detect_container<R: Read + Seek>(reader: &mut ByteReader<R>) -> Result<(ContainerKind, u64)> {
	if reader.read_magic::<3>()? == D2O_MAGIC {
		return Ok((ContainerKind::Plain, 0));
	}

	reader.goto(0)?;
	if reader.read_string()?.as_ref() != AKSD_MAGIC {
		return Err(D2oError::InvalidHeader {
			at: 0,
			reason: "neither D2O nor AKSD marker",
		});
	}
	let version = reader.read_i16()?;
	let blob_len = reader.read_i32()?;
	let blob_offset = reader.position();
	reader.skip(i64::from(blob_len))?;

	let header_offset = reader.position();
	if reader.read_magic::<3>()? != D2O_MAGIC {
		return Err(D2oError::InvalidHeader {
			at: header_offset,
			reason: "AKSD wrapper not followed by D2O marker",
		});
	}

	Ok((
		ContainerKind::Aksd {
			version,
			blob_offset,
			blob_len,
		},
		header_offset,
	))
}

/// Resolve an offset stored relative to the `D2O` marker.
pub(crate) fn resolve_offset(what: &'static str, header_offset: u64, relative: i32) -> Result<u64> {
	let absolute = i64::try_from(header_offset).unwrap_or(i64::MAX).saturating_add(i64::from(relative));
	u64::try_from(absolute).map_err(|_| D2oError::NegativeOffset { what, offset: absolute })
}

#[cfg(test)]
mod tests;
