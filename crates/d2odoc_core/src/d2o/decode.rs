use std::io::{Read, Seek};

use tracing::{debug_span, trace};

use crate::d2o::value::{FieldValue, ObjectValue, Value};
use crate::d2o::{ByteReader, ClassTable, D2oError, DecodePlan, IndexTable, Result};

/// Reference id meaning "no referenced object" (`0xAAAAAAAA` as `i32`).
pub const NULL_REFERENCE: i32 = -1431655766;

/// Runtime limits and behavior switches for object decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum nesting depth. Each followed object reference and each vector level adds one,
	/// so the default decodes a reference chain of 256 objects.
	pub max_depth: u32,
	/// Maximum element count of one vector.
	pub max_vector_len: usize,
	/// In a full scan, require every record to start at an indexed offset.
	pub strict_layout: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 256,
			max_vector_len: 1 << 24,
			strict_layout: false,
		}
	}
}

impl DecodeOptions {
	/// Defaults plus the record layout check.
	pub fn strict() -> Self {
		Self {
			strict_layout: true,
			..Self::default()
		}
	}
}

/// Read-only tables needed to decode records.
#[derive(Debug, Clone, Copy)]
pub struct DecodeTables<'a> {
	/// Object id to record offset mapping.
	pub index: &'a IndexTable,
	/// Class schemas by class id.
	pub classes: &'a ClassTable,
}

/// Sequentially decode as many records as the index table has entries, starting at
/// `records_offset`.
///
/// Index offsets are not consulted except by the optional strict layout check.
pub fn decode_all<R: Read + Seek>(reader: &mut ByteReader<R>, tables: DecodeTables<'_>, records_offset: u64, opt: &DecodeOptions) -> Result<Vec<ObjectValue>> {
	let count = tables.index.len();
	let _span = debug_span!("decode_all", count, records_offset).entered();

	let indexed = opt.strict_layout.then(|| tables.index.offset_set());
	reader.goto(records_offset)?;

	let mut decoder = Decoder::new(reader, tables, opt);
	let mut objects = Vec::with_capacity(count);
	for _ in 0..count {
		let at = decoder.reader.position();
		if indexed.as_ref().is_some_and(|offsets| !offsets.contains(&at)) {
			return Err(D2oError::RecordNotIndexed { offset: at });
		}
		objects.push(decoder.record(0)?);
	}
	Ok(objects)
}

/// Decode the record the index table maps `id` to.
pub fn decode_by_id<R: Read + Seek>(reader: &mut ByteReader<R>, tables: DecodeTables<'_>, id: i32, opt: &DecodeOptions) -> Result<ObjectValue> {
	Decoder::new(reader, tables, opt).object_by_id(id, 0)
}

struct Decoder<'a, R> {
	reader: &'a mut ByteReader<R>,
	index: &'a IndexTable,
	classes: &'a ClassTable,
	opt: &'a DecodeOptions,
	in_progress: Vec<i32>,
}

impl<'a, R: Read + Seek> Decoder<'a, R> {
	fn new(reader: &'a mut ByteReader<R>, tables: DecodeTables<'a>, opt: &'a DecodeOptions) -> Self {
		Self {
			reader,
			index: tables.index,
			classes: tables.classes,
			opt,
			in_progress: Vec::new(),
		}
	}

	fn object_by_id(&mut self, id: i32, depth: u32) -> Result<ObjectValue> {
		if self.in_progress.contains(&id) {
			return Err(D2oError::ReferenceCycle { id });
		}
		let offset = self.index.get(id).ok_or(D2oError::IdNotFound { id })?;
		self.reader.goto(offset)?;

		self.in_progress.push(id);
		let result = self.record(depth);
		self.in_progress.pop();
		result
	}

	fn record(&mut self, depth: u32) -> Result<ObjectValue> {
		let classes = self.classes;
		let at = self.reader.position();
		let class_id = self.reader.read_i32()?;
		let class = classes.get(class_id).ok_or(D2oError::SchemaNotFound { class_id, at })?;
		trace!(class_id, at, class = %class.name, "decoding record");

		let mut fields = Vec::with_capacity(class.fields.len());
		for field in &class.fields {
			let value = self.value(&field.plan, depth + 1)?;
			fields.push(FieldValue {
				name: field.name.clone(),
				value,
			});
		}

		Ok(ObjectValue {
			class_id,
			class_name: class.name.clone(),
			fields,
		})
	}

	fn value(&mut self, plan: &DecodePlan, depth: u32) -> Result<Value> {
		if depth > self.opt.max_depth {
			return Err(D2oError::DecodeDepthExceeded { max_depth: self.opt.max_depth });
		}

		Ok(match plan {
			DecodePlan::Int32 => Value::I32(self.reader.read_i32()?),
			DecodePlan::Boolean => Value::Bool(self.reader.read_bool()?),
			DecodePlan::String => Value::String(self.reader.read_string()?),
			DecodePlan::Double => Value::F64(self.reader.read_f64()?),
			DecodePlan::UInt32 => Value::U32(self.reader.read_u32()?),
			DecodePlan::Vector(vector) => {
				let count = self.vector_len()?;
				let mut items = Vec::with_capacity(count.min(1024));
				for _ in 0..count {
					items.push(self.value(&vector.element, depth + 1)?);
				}
				Value::Array(items)
			}
			DecodePlan::ObjectRef { .. } => {
				let id = self.reader.read_i32()?;
				if id == NULL_REFERENCE {
					return Ok(Value::Null);
				}
				let resume = self.reader.position();
				let object = self.object_by_id(id, depth)?;
				self.reader.goto(resume)?;
				Value::Object(object)
			}
		})
	}

	fn vector_len(&mut self) -> Result<usize> {
		let at = self.reader.position();
		let count = self.reader.read_i32()?;
		let count = usize::try_from(count).map_err(|_| D2oError::NegativeCount {
			what: "vector count",
			count,
			at,
		})?;
		if count > self.opt.max_vector_len {
			return Err(D2oError::VectorTooLarge {
				count,
				max: self.opt.max_vector_len,
			});
		}
		Ok(count)
	}
}
