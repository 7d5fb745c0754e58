use std::path::PathBuf;

use d2odoc::d2o::{ClassSchema, ClassTable, D2oError, D2oFile, Result};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Class id, name, or `namespace.name`.
	#[arg(long = "class")]
	pub class: Option<String>,
	#[arg(long)]
	pub json: bool,
}

/// List class schemas, or print the fields of one.
pub fn run(args: Args) -> Result<()> {
	let Args { path, class, json } = args;

	let file = D2oFile::open(&path)?;
	let classes = file.classes();

	if let Some(query) = class {
		let item = find_class(classes, &query).ok_or(D2oError::ClassNotFound { name: query })?;
		if json {
			return emit_json(&class_json(item));
		}

		println!("class: {}", item.qualified_name());
		println!("id: {}", item.id);
		println!("field_count: {}", item.fields.len());
		for field in &item.fields {
			println!("  {}: {} (tag {})", field.name, field.plan, field.type_tag);
		}
		return Ok(());
	}

	if json {
		let items: Vec<_> = classes.schemas().into_iter().map(class_json).collect();
		return emit_json(&items);
	}

	println!("path: {}", path.display());
	println!("classes: {}", classes.len());
	println!("id\tfields\tclass");
	for item in classes.schemas() {
		println!("{}\t{}\t{}", item.id, item.fields.len(), item.qualified_name());
	}

	Ok(())
}

fn find_class<'a>(classes: &'a ClassTable, query: &str) -> Option<&'a ClassSchema> {
	if let Ok(id) = query.parse::<i32>() {
		return classes.get(id);
	}
	classes.find_by_name(query)
}

fn class_json(item: &ClassSchema) -> ClassJson {
	ClassJson {
		id: item.id,
		namespace: item.namespace.to_string(),
		name: item.name.to_string(),
		fields: item
			.fields
			.iter()
			.map(|field| FieldJson {
				name: field.name.to_string(),
				tag: field.type_tag,
				plan: field.plan.to_string(),
			})
			.collect(),
	}
}

#[derive(serde::Serialize)]
struct ClassJson {
	id: i32,
	namespace: String,
	name: String,
	fields: Vec<FieldJson>,
}

#[derive(serde::Serialize)]
struct FieldJson {
	name: String,
	tag: i32,
	plan: String,
}
