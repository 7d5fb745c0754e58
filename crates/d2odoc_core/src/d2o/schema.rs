use std::collections::HashMap;
use std::fmt;
use std::io::{Read, Seek};

use tracing::{debug, warn};

use crate::d2o::{ByteReader, D2oError, Result};

const MAX_PREALLOC: usize = 1024;
/// Deepest `vector<vector<..>>` chain a field type may declare.
pub const MAX_VECTOR_NESTING: usize = 256;

/// Signed 32-bit integer tag.
pub const TYPE_INT: i32 = -1;
/// Boolean byte tag.
pub const TYPE_BOOLEAN: i32 = -2;
/// Length-prefixed string tag.
pub const TYPE_STRING: i32 = -3;
/// 64-bit float tag.
pub const TYPE_NUMBER: i32 = -4;
/// Localization key tag, stored as a signed 32-bit integer.
pub const TYPE_I18N: i32 = -5;
/// Unsigned 32-bit integer tag.
pub const TYPE_UINT: i32 = -6;
/// Vector tag; followed in the schema by one `(name, tag)` pair for the element type.
pub const TYPE_VECTOR: i32 = -99;

/// Resolved instruction tree for reading one field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodePlan {
	/// Big-endian `i32`.
	Int32,
	/// One byte, nonzero meaning `true`.
	Boolean,
	/// `u16` length-prefixed string.
	String,
	/// Big-endian `f64`.
	Double,
	/// Big-endian `u32`.
	UInt32,
	/// `i32` element count followed by that many elements.
	Vector(VectorPlan),
	/// `i32` object id resolved through the index table at decode time.
	ObjectRef {
		/// Class named by the schema; the referenced record's own class id decides decoding.
		class_id: i32,
	},
}

/// Element description of a vector plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorPlan {
	/// Element type name as stored in the schema.
	pub element_type: Box<str>,
	/// Plan applied to every element.
	pub element: Box<DecodePlan>,
}

impl DecodePlan {
	/// Plan for a tag that needs no further schema input, if any.
	pub fn from_scalar_tag(tag: i32) -> Option<Self> {
		match tag {
			TYPE_INT | TYPE_I18N => Some(Self::Int32),
			TYPE_BOOLEAN => Some(Self::Boolean),
			TYPE_STRING => Some(Self::String),
			TYPE_NUMBER => Some(Self::Double),
			TYPE_UINT => Some(Self::UInt32),
			tag if tag > 0 => Some(Self::ObjectRef { class_id: tag }),
			_ => None,
		}
	}

	/// Resolve `tag` for `field` of `class_id`, reading one element pair per vector level.
	///
	/// Chains deeper than [`MAX_VECTOR_NESTING`] fail with `SchemaTooDeep`.
	pub fn resolve<R: Read + Seek>(reader: &mut ByteReader<R>, class_id: i32, field: &str, tag: i32) -> Result<Self> {
		let mut element_types = Vec::new();
		let mut tag = tag;
		while tag == TYPE_VECTOR {
			if element_types.len() == MAX_VECTOR_NESTING {
				return Err(D2oError::SchemaTooDeep {
					class_id,
					field: field.to_owned(),
					max: MAX_VECTOR_NESTING,
				});
			}
			element_types.push(reader.read_string()?);
			tag = reader.read_i32()?;
		}

		let leaf = Self::from_scalar_tag(tag).ok_or_else(|| D2oError::InvalidTypeTag {
			class_id,
			field: field.to_owned(),
			tag,
		})?;
		Ok(element_types.into_iter().rev().fold(leaf, |element, element_type| {
			Self::Vector(VectorPlan {
				element_type,
				element: Box::new(element),
			})
		}))
	}
}

impl fmt::Display for DecodePlan {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Int32 => f.write_str("int"),
			Self::Boolean => f.write_str("bool"),
			Self::String => f.write_str("string"),
			Self::Double => f.write_str("number"),
			Self::UInt32 => f.write_str("uint"),
			Self::Vector(vector) => write!(f, "vector<{}>", vector.element),
			Self::ObjectRef { class_id } => write!(f, "object#{class_id}"),
		}
	}
}

/// One field declaration with its resolved plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
	/// Field name.
	pub name: Box<str>,
	/// Raw type tag from the schema.
	pub type_tag: i32,
	/// Resolved decode plan.
	pub plan: DecodePlan,
}

/// One class definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSchema {
	/// Class id used by records and references.
	pub id: i32,
	/// Namespace string.
	pub namespace: Box<str>,
	/// Class name.
	pub name: Box<str>,
	/// Fields in decode order.
	pub fields: Vec<FieldSchema>,
}

impl ClassSchema {
	/// Decode one class definition body for class `id`.
	pub fn parse<R: Read + Seek>(reader: &mut ByteReader<R>, id: i32) -> Result<Self> {
		let namespace = reader.read_string()?;
		let name = reader.read_string()?;
		let field_count = read_count(reader, "field count")?;

		let mut fields = Vec::with_capacity(field_count.min(MAX_PREALLOC));
		for _ in 0..field_count {
			let field_name = reader.read_string()?;
			let type_tag = reader.read_i32()?;
			let plan = DecodePlan::resolve(reader, id, &field_name, type_tag)?;
			fields.push(FieldSchema {
				name: field_name,
				type_tag,
				plan,
			});
		}

		Ok(Self { id, namespace, name, fields })
	}

	/// `namespace.name`, or just the name for an empty namespace.
	pub fn qualified_name(&self) -> String {
		if self.namespace.is_empty() {
			self.name.to_string()
		} else {
			format!("{}.{}", self.namespace, self.name)
		}
	}

	/// Field declaration by name.
	pub fn field(&self, name: &str) -> Option<&FieldSchema> {
		self.fields.iter().find(|field| field.name.as_ref() == name)
	}
}

/// All class definitions of one container, keyed by class id.
#[derive(Debug, Clone, Default)]
pub struct ClassTable {
	classes: HashMap<i32, ClassSchema>,
}

impl ClassTable {
	/// Decode the class table at the current position.
	///
	/// Fails as a whole on the first unresolvable field; no partial table is returned.
	pub fn parse<R: Read + Seek>(reader: &mut ByteReader<R>) -> Result<Self> {
		let count = read_count(reader, "class count")?;
		let mut classes = HashMap::with_capacity(count.min(MAX_PREALLOC));
		for _ in 0..count {
			let id = reader.read_i32()?;
			let class = ClassSchema::parse(reader, id)?;
			if classes.insert(id, class).is_some() {
				warn!(class_id = id, "duplicate class id, keeping last definition");
			}
		}

		debug!(classes = classes.len(), "class table loaded");
		Ok(Self { classes })
	}

	/// Schema for class `id`.
	pub fn get(&self, id: i32) -> Option<&ClassSchema> {
		self.classes.get(&id)
	}

	/// Schema whose name or qualified name equals `name`.
	pub fn find_by_name(&self, name: &str) -> Option<&ClassSchema> {
		self.schemas()
			.into_iter()
			.find(|item| item.name.as_ref() == name || item.qualified_name() == name)
	}

	/// Number of classes.
	pub fn len(&self) -> usize {
		self.classes.len()
	}

	/// Whether the table has no classes.
	pub fn is_empty(&self) -> bool {
		self.classes.is_empty()
	}

	/// Schemas in ascending class id order.
	pub fn schemas(&self) -> Vec<&ClassSchema> {
		let mut items: Vec<_> = self.classes.values().collect();
		items.sort_unstable_by_key(|item| item.id);
		items
	}
}

fn read_count<R: Read + Seek>(reader: &mut ByteReader<R>, what: &'static str) -> Result<usize> {
	let at = reader.position();
	let count = reader.read_i32()?;
	usize::try_from(count).map_err(|_| D2oError::NegativeCount { what, count, at })
}
