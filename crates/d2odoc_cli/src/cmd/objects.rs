use std::path::PathBuf;

use d2odoc::d2o::{D2oFile, ObjectValue, Result};

use crate::cmd::print::{PrintOptions, print_object};
use crate::cmd::util::{DecodeArgs, emit_json, object_to_json};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Print at most this many objects.
	#[arg(long)]
	pub limit: Option<usize>,
	/// Resolve each indexed id by random access instead of scanning records.
	#[arg(long = "by-id")]
	pub by_id: bool,
	#[arg(long)]
	pub json: bool,
	#[command(flatten)]
	pub decode: DecodeArgs,
}

/// Decode every object and print them.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		limit,
		by_id,
		json,
		decode,
	} = args;

	let mut file = D2oFile::open(&path)?;
	let options = decode.options();
	let rows: Vec<(Option<i32>, ObjectValue)> = if by_id {
		file.objects_by_id(&options)?.into_iter().map(|(id, object)| (Some(id), object)).collect()
	} else {
		file.objects_with(&options)?.into_iter().map(|object| (None, object)).collect()
	};
	let count = rows.len();
	let shown = limit.unwrap_or(count).min(count);

	if json {
		return emit_json(&ObjectsJson {
			path: path.display().to_string(),
			count,
			objects: rows
				.iter()
				.take(shown)
				.map(|(id, object)| ObjectJson {
					id: *id,
					value: object_to_json(object),
				})
				.collect(),
		});
	}

	println!("path: {}", path.display());
	println!("count: {count}");
	for (position, (id, object)) in rows.iter().take(shown).enumerate() {
		match id {
			Some(id) => println!("[{position}] id={id}"),
			None => println!("[{position}]"),
		}
		print_object(object, PrintOptions::default());
	}
	if shown < count {
		println!("... {} more", count - shown);
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct ObjectsJson {
	path: String,
	count: usize,
	objects: Vec<ObjectJson>,
}

#[derive(serde::Serialize)]
struct ObjectJson {
	#[serde(skip_serializing_if = "Option::is_none")]
	id: Option<i32>,
	value: serde_json::Value,
}
