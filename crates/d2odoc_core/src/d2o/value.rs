/// Decoded field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Null object reference.
	Null,
	/// Boolean field.
	Bool(bool),
	/// Signed integer or i18n key field.
	I32(i32),
	/// Unsigned integer field.
	U32(u32),
	/// Number field.
	F64(f64),
	/// String field.
	String(Box<str>),
	/// Vector field, in file order.
	Array(Vec<Value>),
	/// Resolved object reference.
	Object(ObjectValue),
}

impl Value {
	/// Inner signed integer, if this is one.
	pub fn as_i32(&self) -> Option<i32> {
		match self {
			Self::I32(value) => Some(*value),
			_ => None,
		}
	}

	/// Inner string, if this is one.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(value) => Some(value),
			_ => None,
		}
	}

	/// Inner elements, if this is a vector.
	pub fn as_array(&self) -> Option<&[Value]> {
		match self {
			Self::Array(items) => Some(items),
			_ => None,
		}
	}

	/// Inner object, if this is a resolved reference.
	pub fn as_object(&self) -> Option<&ObjectValue> {
		match self {
			Self::Object(item) => Some(item),
			_ => None,
		}
	}
}

/// One decoded record.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectValue {
	/// Class id stored in the record.
	pub class_id: i32,
	/// Name of that class.
	pub class_name: Box<str>,
	/// Field values in schema order.
	pub fields: Vec<FieldValue>,
}

impl ObjectValue {
	/// Value of field `name`.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.fields.iter().find(|field| field.name.as_ref() == name).map(|field| &field.value)
	}
}

/// Named field value.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue {
	/// Field name.
	pub name: Box<str>,
	/// Decoded value.
	pub value: Value,
}
