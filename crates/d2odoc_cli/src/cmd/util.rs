use std::io::Write;

use d2odoc::d2o::{DecodeOptions, ObjectValue, Result, Value};
use serde_json::{Map, Value as JsonValue, json};

/// Decoder limit flags shared by decoding commands.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct DecodeArgs {
	/// Maximum nesting of vectors and references.
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	/// Maximum element count of one vector.
	#[arg(long = "max-vector")]
	pub max_vector: Option<usize>,
	/// Require scanned records to start at indexed offsets.
	#[arg(long = "strict-layout")]
	pub strict_layout: bool,
}

impl DecodeArgs {
	/// Apply flags over default decode options.
	pub fn options(&self) -> DecodeOptions {
		let mut options = DecodeOptions::default();
		if let Some(max_depth) = self.max_depth {
			options.max_depth = max_depth;
		}
		if let Some(max_vector) = self.max_vector {
			options.max_vector_len = max_vector;
		}
		options.strict_layout = self.strict_layout;
		options
	}
}

/// Write `payload` as pretty JSON to stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	let mut out = std::io::stdout().lock();
	serde_json::to_writer_pretty(&mut out, payload).map_err(std::io::Error::from)?;
	writeln!(out)?;
	Ok(())
}

/// Convert a decoded value into JSON.
pub(crate) fn value_to_json(value: &Value) -> JsonValue {
	match value {
		Value::Null => JsonValue::Null,
		Value::Bool(v) => json!(v),
		Value::I32(v) => json!(v),
		Value::U32(v) => json!(v),
		Value::F64(v) => json!(v),
		Value::String(v) => json!(v),
		Value::Array(items) => JsonValue::Array(items.iter().map(value_to_json).collect()),
		Value::Object(item) => object_to_json(item),
	}
}

/// Convert a decoded object into `{class, class_id, fields}` JSON.
pub(crate) fn object_to_json(object: &ObjectValue) -> JsonValue {
	let fields: Map<String, JsonValue> = object
		.fields
		.iter()
		.map(|field| (field.name.to_string(), value_to_json(&field.value)))
		.collect();

	let mut out = Map::new();
	out.insert("class".to_owned(), json!(object.class_name.as_ref()));
	out.insert("class_id".to_owned(), json!(object.class_id));
	out.insert("fields".to_owned(), JsonValue::Object(fields));
	JsonValue::Object(out)
}
