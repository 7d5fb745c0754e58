use std::fmt::Write;

use d2odoc::d2o::{ObjectValue, Value};

/// Output truncation and formatting limits for decoded values.
#[derive(Debug, Clone, Copy)]
pub struct PrintOptions {
	/// Maximum number of fields printed for a single object.
	pub max_fields_per_object: usize,
	/// Maximum number of Unicode scalar values printed for strings.
	pub max_string_len: usize,
	/// Maximum number of elements printed for vectors.
	pub max_array_items: usize,
	/// Maximum recursive print depth for nested vectors/objects.
	pub max_print_depth: u32,
}

impl Default for PrintOptions {
	fn default() -> Self {
		Self {
			max_fields_per_object: 80,
			max_string_len: 200,
			max_array_items: 16,
			max_print_depth: 6,
		}
	}
}

/// Print one decoded object to stdout.
pub fn print_object(object: &ObjectValue, options: PrintOptions) {
	let mut out = String::new();
	render_object(&mut out, object, 0, 0, options);
	print!("{out}");
}

/// Render one decoded object tree.
pub fn render_object(out: &mut String, object: &ObjectValue, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	if depth >= options.max_print_depth {
		let _ = writeln!(out, "{pad}{} {{ ... }}", object.class_name);
		return;
	}

	let _ = writeln!(out, "{pad}{} {{", object.class_name);
	for field in object.fields.iter().take(options.max_fields_per_object) {
		let _ = write!(out, "{pad}  {} = ", field.name);
		if matches!(field.value, Value::Object(_) | Value::Array(_)) {
			let _ = writeln!(out);
			render_value(out, &field.value, indent + 4, depth + 1, options);
		} else {
			render_value(out, &field.value, 0, depth + 1, options);
		}
	}
	if object.fields.len() > options.max_fields_per_object {
		let _ = writeln!(out, "{pad}  ... {} more fields", object.fields.len() - options.max_fields_per_object);
	}
	let _ = writeln!(out, "{pad}}}");
}

/// Render one decoded value tree.
pub fn render_value(out: &mut String, value: &Value, indent: usize, depth: u32, options: PrintOptions) {
	let pad = " ".repeat(indent);
	match value {
		Value::Null => {
			let _ = writeln!(out, "{pad}null");
		}
		Value::Bool(v) => {
			let _ = writeln!(out, "{pad}{v}");
		}
		Value::I32(v) => {
			let _ = writeln!(out, "{pad}{v}");
		}
		Value::U32(v) => {
			let _ = writeln!(out, "{pad}{v}");
		}
		Value::F64(v) => {
			let _ = writeln!(out, "{pad}{v}");
		}
		Value::String(v) => {
			let _ = writeln!(out, "{pad}\"{}\"", truncate(v, options.max_string_len));
		}
		Value::Array(items) => {
			if depth >= options.max_print_depth {
				let _ = writeln!(out, "{pad}[... {} items]", items.len());
				return;
			}
			let _ = writeln!(out, "{pad}[");
			for item in items.iter().take(options.max_array_items) {
				render_value(out, item, indent + 2, depth + 1, options);
			}
			if items.len() > options.max_array_items {
				let _ = writeln!(out, "{pad}  ... {} more", items.len() - options.max_array_items);
			}
			let _ = writeln!(out, "{pad}]");
		}
		Value::Object(item) => render_object(out, item, indent, depth, options),
	}
}

fn truncate(input: &str, max_len: usize) -> String {
	if input.chars().count() <= max_len {
		return input.to_owned();
	}
	let out: String = input.chars().take(max_len).collect();
	format!("{out}...")
}

#[cfg(test)]
mod tests;
