use std::io::{self, Read, Seek, SeekFrom};

use byteorder::{BigEndian, ReadBytesExt};

use crate::d2o::{D2oError, Result};

/// Big-endian primitive reader over a seekable byte source.
///
/// The reader tracks its absolute position so errors can report where a read failed
/// without querying the underlying source.
pub struct ByteReader<R> {
	inner: R,
	pos: u64,
}

impl<R: Read + Seek> ByteReader<R> {
	/// Wrap `inner`, starting at its current stream position.
	pub fn new(mut inner: R) -> Result<Self> {
		let pos = inner.stream_position()?;
		Ok(Self { inner, pos })
	}

	/// Return current absolute byte offset.
	pub fn position(&self) -> u64 {
		self.pos
	}

	/// Seek to an absolute offset.
	pub fn goto(&mut self, offset: u64) -> Result<()> {
		self.pos = self.inner.seek(SeekFrom::Start(offset))?;
		Ok(())
	}

	/// Seek relative to the current position.
	pub fn skip(&mut self, delta: i64) -> Result<()> {
		let target = i64::try_from(self.pos).unwrap_or(i64::MAX).saturating_add(delta);
		if target < 0 {
			return Err(D2oError::NegativeOffset { what: "seek", offset: target });
		}
		self.pos = self.inner.seek(SeekFrom::Current(delta))?;
		Ok(())
	}

	/// Read one byte, nonzero meaning `true`.
	pub fn read_bool(&mut self) -> Result<bool> {
		Ok(self.read_u8()? != 0)
	}

	/// Read an `i8`.
	pub fn read_i8(&mut self) -> Result<i8> {
		self.read_with(1, |r| r.read_i8())
	}

	/// Read a `u8`.
	pub fn read_u8(&mut self) -> Result<u8> {
		self.read_with(1, |r| r.read_u8())
	}

	/// Read a big-endian `i16`.
	pub fn read_i16(&mut self) -> Result<i16> {
		self.read_with(2, |r| r.read_i16::<BigEndian>())
	}

	/// Read a big-endian `u16`.
	pub fn read_u16(&mut self) -> Result<u16> {
		self.read_with(2, |r| r.read_u16::<BigEndian>())
	}

	/// Read a big-endian `i32`.
	pub fn read_i32(&mut self) -> Result<i32> {
		self.read_with(4, |r| r.read_i32::<BigEndian>())
	}

	/// Read a big-endian `u32`.
	pub fn read_u32(&mut self) -> Result<u32> {
		self.read_with(4, |r| r.read_u32::<BigEndian>())
	}

	/// Read a big-endian `f32`.
	pub fn read_f32(&mut self) -> Result<f32> {
		self.read_with(4, |r| r.read_f32::<BigEndian>())
	}

	/// Read a big-endian `f64`.
	pub fn read_f64(&mut self) -> Result<f64> {
		self.read_with(8, |r| r.read_f64::<BigEndian>())
	}

	/// Read exactly `n` bytes.
	pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
		let mut buf = vec![0_u8; n];
		self.read_with(n, |r| r.read_exact(&mut buf))?;
		Ok(buf)
	}

	/// Read a fixed-size marker.
	pub fn read_magic<const N: usize>(&mut self) -> Result<[u8; N]> {
		let mut buf = [0_u8; N];
		self.read_with(N, |r| r.read_exact(&mut buf))?;
		Ok(buf)
	}

	/// Read a `u16` length-prefixed string, decoding invalid UTF-8 lossily.
	pub fn read_string(&mut self) -> Result<Box<str>> {
		let len = usize::from(self.read_u16()?);
		let bytes = self.read_bytes(len)?;
		Ok(String::from_utf8_lossy(&bytes).into_owned().into_boxed_str())
	}

	fn read_with<T>(&mut self, need: usize, read: impl FnOnce(&mut R) -> io::Result<T>) -> Result<T> {
		let at = self.pos;
		match read(&mut self.inner) {
			Ok(value) => {
				self.pos += need as u64;
				Ok(value)
			}
			Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Err(D2oError::UnexpectedEof { at, need }),
			Err(err) => Err(err.into()),
		}
	}
}
