use std::path::PathBuf;

use d2odoc::d2o::{ContainerKind, D2oFile, Result};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print header location and table statistics.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let file = D2oFile::open(&path)?;
	let header = file.header;
	let (wrapper_version, blob_offset, blob_len) = match header.kind {
		ContainerKind::Plain => (None, None, None),
		ContainerKind::Aksd {
			version,
			blob_offset,
			blob_len,
		} => (Some(version), Some(blob_offset), Some(blob_len)),
	};

	if json {
		return emit_json(&InfoJson {
			path: path.display().to_string(),
			kind: header.kind.as_str(),
			wrapper_version,
			blob_offset,
			blob_len,
			header_offset: header.header_offset,
			index_offset: header.index_offset,
			records_offset: header.records_offset(),
			index_entries: file.index().len(),
			duplicate_ids: file.index().duplicates(),
			classes: file.classes().len(),
		});
	}

	println!("path: {}", path.display());
	println!("kind: {}", header.kind.as_str());
	if let (Some(version), Some(offset), Some(len)) = (wrapper_version, blob_offset, blob_len) {
		println!("wrapper_version: {version}");
		println!("blob: {len} bytes at {offset}");
	}
	println!("header_offset: {}", header.header_offset);
	println!("index_offset: {}", header.index_offset);
	println!("records_offset: {}", header.records_offset());
	println!("index_entries: {}", file.index().len());
	println!("duplicate_ids: {}", file.index().duplicates());
	println!("classes: {}", file.classes().len());

	Ok(())
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	kind: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	wrapper_version: Option<i16>,
	#[serde(skip_serializing_if = "Option::is_none")]
	blob_offset: Option<u64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	blob_len: Option<i32>,
	header_offset: u64,
	index_offset: u64,
	records_offset: u64,
	index_entries: usize,
	duplicate_ids: usize,
	classes: usize,
}
