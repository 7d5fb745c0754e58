//! Shared test helpers for workspace crates.
//!
//! [`D2oBuilder`] assembles D2O byte images in memory so tests can describe a container
//! (class schemas, records, index entries) instead of shipping binary fixtures.

use byteorder::{BigEndian, WriteBytesExt};

/// Reference id meaning "no referenced object".
pub const NULL_REF: i32 = -1431655766;

/// Field type written into a class definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
	/// Signed 32-bit integer (`-1`).
	Int,
	/// Boolean byte (`-2`).
	Bool,
	/// Length-prefixed string (`-3`).
	String,
	/// 64-bit float (`-4`).
	Number,
	/// Localization key stored as a signed 32-bit integer (`-5`).
	I18n,
	/// Unsigned 32-bit integer (`-6`).
	Uint,
	/// Vector of the inner type (`-99`).
	Vector(Box<FieldType>),
	/// Reference to an object of the given class id.
	Object(i32),
	/// Arbitrary tag, used to produce malformed schemas.
	Raw(i32),
}

impl FieldType {
	/// Build a vector type around `inner`.
	pub fn vector(inner: FieldType) -> Self {
		Self::Vector(Box::new(inner))
	}

	/// Type tag stored in the class table.
	pub fn tag(&self) -> i32 {
		match self {
			Self::Int => -1,
			Self::Bool => -2,
			Self::String => -3,
			Self::Number => -4,
			Self::I18n => -5,
			Self::Uint => -6,
			Self::Vector(_) => -99,
			Self::Object(class_id) => *class_id,
			Self::Raw(tag) => *tag,
		}
	}

	/// Display name written for vector element types.
	pub fn type_name(&self) -> String {
		match self {
			Self::Int => "int".to_owned(),
			Self::Bool => "Boolean".to_owned(),
			Self::String => "String".to_owned(),
			Self::Number => "Number".to_owned(),
			Self::I18n => "int".to_owned(),
			Self::Uint => "uint".to_owned(),
			Self::Vector(inner) => format!("Vector.<{}>", inner.type_name()),
			Self::Object(class_id) => format!("Object#{class_id}"),
			Self::Raw(tag) => format!("raw#{tag}"),
		}
	}
}

/// Big-endian record payload writer.
#[derive(Debug, Clone, Default)]
pub struct Payload {
	bytes: Vec<u8>,
}

impl Payload {
	/// Create an empty payload.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a signed 32-bit integer.
	pub fn i32(mut self, value: i32) -> Self {
		self.bytes.write_i32::<BigEndian>(value).expect("vec write");
		self
	}

	/// Append an unsigned 32-bit integer.
	pub fn u32(mut self, value: u32) -> Self {
		self.bytes.write_u32::<BigEndian>(value).expect("vec write");
		self
	}

	/// Append a boolean byte.
	pub fn bool(mut self, value: bool) -> Self {
		self.bytes.write_u8(u8::from(value)).expect("vec write");
		self
	}

	/// Append a 64-bit float.
	pub fn f64(mut self, value: f64) -> Self {
		self.bytes.write_f64::<BigEndian>(value).expect("vec write");
		self
	}

	/// Append a u16 length-prefixed string.
	pub fn string(mut self, value: &str) -> Self {
		write_string(&mut self.bytes, value);
		self
	}

	/// Append a vector element count.
	pub fn count(self, count: i32) -> Self {
		self.i32(count)
	}

	/// Append an object reference id.
	pub fn reference(self, id: i32) -> Self {
		self.i32(id)
	}

	/// Append the null reference sentinel.
	pub fn null_ref(self) -> Self {
		self.i32(NULL_REF)
	}

	/// Append raw bytes.
	pub fn raw(mut self, bytes: &[u8]) -> Self {
		self.bytes.extend_from_slice(bytes);
		self
	}

	/// Return the encoded bytes.
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}
}

#[derive(Debug, Clone)]
struct ClassDef {
	id: i32,
	namespace: String,
	name: String,
	fields: Vec<(String, FieldType)>,
}

#[derive(Debug, Clone)]
struct Record {
	id: Option<i32>,
	class_id: i32,
	payload: Vec<u8>,
}

/// In-memory D2O container builder.
///
/// Records are laid out contiguously after the 7-byte preamble in insertion order, followed
/// by the index table and then the class table. Every offset is written relative to the
/// `D2O` marker, so the same image can be embedded behind an `AKSD` wrapper unchanged.
#[derive(Debug, Clone, Default)]
pub struct D2oBuilder {
	classes: Vec<ClassDef>,
	records: Vec<Record>,
	index_len_extra: usize,
}

impl D2oBuilder {
	/// Create an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a class definition.
	pub fn class(mut self, id: i32, namespace: &str, name: &str, fields: &[(&str, FieldType)]) -> Self {
		self.classes.push(ClassDef {
			id,
			namespace: namespace.to_owned(),
			name: name.to_owned(),
			fields: fields.iter().map(|(name, ty)| ((*name).to_owned(), ty.clone())).collect(),
		});
		self
	}

	/// Add a record and an index entry pointing at it.
	pub fn object(mut self, id: i32, class_id: i32, payload: Payload) -> Self {
		self.records.push(Record {
			id: Some(id),
			class_id,
			payload: payload.bytes,
		});
		self
	}

	/// Add a record without an index entry.
	pub fn unindexed(mut self, class_id: i32, payload: Payload) -> Self {
		self.records.push(Record {
			id: None,
			class_id,
			payload: payload.bytes,
		});
		self
	}

	/// Declare `bytes` more index block length than the entries occupy.
	///
	/// Nothing extra is written; the class table still follows the last entry.
	pub fn index_len_extra(mut self, bytes: usize) -> Self {
		self.index_len_extra = bytes;
		self
	}

	/// Encode a plain `D2O` container.
	pub fn build(&self) -> Vec<u8> {
		let mut out = b"D2O".to_vec();
		out.write_i32::<BigEndian>(0).expect("vec write");

		let mut entries = Vec::new();
		for record in &self.records {
			let offset = to_i32(out.len());
			if let Some(id) = record.id {
				entries.push((id, offset));
			}
			out.write_i32::<BigEndian>(record.class_id).expect("vec write");
			out.extend_from_slice(&record.payload);
		}

		let index_offset = to_i32(out.len());
		out[3..7].copy_from_slice(&index_offset.to_be_bytes());

		let index_len = entries.len() * 8 + self.index_len_extra;
		out.write_i32::<BigEndian>(to_i32(index_len)).expect("vec write");
		for (id, offset) in entries {
			out.write_i32::<BigEndian>(id).expect("vec write");
			out.write_i32::<BigEndian>(offset).expect("vec write");
		}

		out.write_i32::<BigEndian>(to_i32(self.classes.len())).expect("vec write");
		for class in &self.classes {
			out.write_i32::<BigEndian>(class.id).expect("vec write");
			write_string(&mut out, &class.namespace);
			write_string(&mut out, &class.name);
			out.write_i32::<BigEndian>(to_i32(class.fields.len())).expect("vec write");
			for (name, ty) in &class.fields {
				write_string(&mut out, name);
				write_type(&mut out, ty);
			}
		}

		out
	}

	/// Encode the container behind an `AKSD` wrapper holding `blob`.
	pub fn build_wrapped(&self, version: i16, blob: &[u8]) -> Vec<u8> {
		let mut out = Vec::new();
		write_string(&mut out, "AKSD");
		out.write_i16::<BigEndian>(version).expect("vec write");
		out.write_i32::<BigEndian>(to_i32(blob.len())).expect("vec write");
		out.extend_from_slice(blob);
		out.extend_from_slice(&self.build());
		out
	}
}

fn write_type(out: &mut Vec<u8>, ty: &FieldType) {
	out.write_i32::<BigEndian>(ty.tag()).expect("vec write");
	if let FieldType::Vector(inner) = ty {
		write_string(out, &inner.type_name());
		write_type(out, inner);
	}
}

fn write_string(out: &mut Vec<u8>, value: &str) {
	let len = u16::try_from(value.len()).expect("fixture string fits u16 length");
	out.write_u16::<BigEndian>(len).expect("vec write");
	out.extend_from_slice(value.as_bytes());
}

fn to_i32(value: usize) -> i32 {
	i32::try_from(value).expect("fixture offset fits i32")
}
