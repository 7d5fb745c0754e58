use std::path::PathBuf;

use d2odoc::d2o::{D2oFile, Result};

use crate::cmd::print::{PrintOptions, print_object};
use crate::cmd::util::{DecodeArgs, emit_json, object_to_json};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Object id from the index table.
	#[arg(long, allow_negative_numbers = true)]
	pub id: i32,
	#[arg(long)]
	pub json: bool,
	#[command(flatten)]
	pub decode: DecodeArgs,
}

/// Decode and print one object by id.
pub fn run(args: Args) -> Result<()> {
	let Args { path, id, json, decode } = args;

	let mut file = D2oFile::open(&path)?;
	let object = file.object_with(id, &decode.options())?;

	if json {
		return emit_json(&ShowJson {
			path: path.display().to_string(),
			id,
			value: object_to_json(&object),
		});
	}

	println!("path: {}", path.display());
	println!("id: {id}");
	println!("class_id: {}", object.class_id);
	print_object(&object, PrintOptions::default());

	Ok(())
}

#[derive(serde::Serialize)]
struct ShowJson {
	path: String,
	id: i32,
	value: serde_json::Value,
}
