use d2odoc::d2o::{FieldValue, ObjectValue, Value};

use super::{PrintOptions, render_object};

fn object(name: &str, fields: Vec<(&str, Value)>) -> ObjectValue {
	ObjectValue {
		class_id: 1,
		class_name: name.into(),
		fields: fields
			.into_iter()
			.map(|(name, value)| FieldValue { name: name.into(), value })
			.collect(),
	}
}

fn render(object: &ObjectValue, options: PrintOptions) -> String {
	let mut out = String::new();
	render_object(&mut out, object, 0, 0, options);
	out
}

#[test]
fn renders_scalars_inline_and_containers_below() {
	let item = object(
		"Item",
		vec![
			("id", Value::I32(3)),
			("name", Value::String("Sword".into())),
			("tags", Value::Array(vec![Value::I32(1), Value::I32(2)])),
			("owner", Value::Null),
		],
	);

	let text = render(&item, PrintOptions::default());
	assert_eq!(text, "Item {\n  id = 3\n  name = \"Sword\"\n  tags = \n    [\n      1\n      2\n    ]\n  owner = null\n}\n");
}

#[test]
fn truncates_long_strings_and_arrays() {
	let options = PrintOptions {
		max_string_len: 3,
		max_array_items: 1,
		..PrintOptions::default()
	};
	let item = object(
		"Item",
		vec![("name", Value::String("Excalibur".into())), ("tags", Value::Array(vec![Value::I32(1), Value::I32(2), Value::I32(3)]))],
	);

	let text = render(&item, options);
	assert!(text.contains("name = \"Exc...\""), "{text}");
	assert!(text.contains("... 2 more"), "{text}");
}

#[test]
fn stops_at_print_depth() {
	let options = PrintOptions {
		max_print_depth: 1,
		..PrintOptions::default()
	};
	let inner = object("Inner", vec![("x", Value::I32(1))]);
	let outer = object("Outer", vec![("inner", Value::Object(inner))]);

	let text = render(&outer, options);
	assert!(text.contains("Inner { ... }"), "{text}");
	assert!(!text.contains("x = 1"), "{text}");
}
