use std::io::Cursor;

use d2odoc_testkit::{D2oBuilder, FieldType, Payload};

use crate::d2o::{ByteReader, ClassTable, D2oError, D2oHeader, IndexTable};

fn load(bytes: Vec<u8>) -> (crate::d2o::Result<IndexTable>, ByteReader<Cursor<Vec<u8>>>) {
	let mut reader = ByteReader::new(Cursor::new(bytes)).expect("reader wraps cursor");
	let header = D2oHeader::parse(&mut reader).expect("header parses");
	(IndexTable::parse(&mut reader, &header), reader)
}

fn two_points() -> D2oBuilder {
	D2oBuilder::new()
		.class(1, "ns", "Point", &[("x", FieldType::Int)])
		.object(5, 1, Payload::new().i32(50))
		.object(9, 1, Payload::new().i32(90))
}

#[test]
fn entries_are_absolute_offsets() {
	let (table, _) = load(two_points().build());
	let table = table.expect("index parses");
	assert_eq!(table.len(), 2);
	assert_eq!(table.get(5), Some(7));
	assert_eq!(table.get(9), Some(15));
	assert_eq!(table.get(1), None);
	assert_eq!(table.ids(), vec![5, 9]);
}

#[test]
fn wrapped_entries_include_header_offset() {
	let (table, _) = load(two_points().build_wrapped(1, b"xyz"));
	let table = table.expect("index parses");
	let header_offset = 2 + 4 + 2 + 4 + 3;
	assert_eq!(table.get(5), Some(header_offset + 7));
	assert_eq!(table.get(9), Some(header_offset + 15));
}

#[test]
fn duplicate_ids_keep_last_offset() {
	let bytes = D2oBuilder::new()
		.class(1, "ns", "Point", &[("x", FieldType::Int)])
		.object(7, 1, Payload::new().i32(1))
		.object(7, 1, Payload::new().i32(2))
		.build();
	let (table, _) = load(bytes);
	let table = table.expect("index parses");
	assert_eq!(table.len(), 1);
	assert_eq!(table.duplicates(), 1);
	assert_eq!(table.get(7), Some(15));
}

#[test]
fn class_table_follows_last_whole_entry() {
	let bytes = two_points().index_len_extra(4).build();
	let (table, mut reader) = load(bytes);
	let table = table.expect("index parses");
	assert_eq!(table.len(), 2);
	// index offset 23, then length field and two entries; the 4 odd bytes are not skipped
	assert_eq!(reader.position(), 23 + 4 + 16);

	let classes = ClassTable::parse(&mut reader).expect("class table starts after the entries");
	assert_eq!(classes.get(1).map(|class| class.name.as_ref()), Some("Point"));
}

#[test]
fn negative_length_is_rejected() {
	let mut bytes = two_points().build();
	bytes[23..27].copy_from_slice(&(-8_i32).to_be_bytes());
	let (table, _) = load(bytes);
	let err = table.expect_err("negative index length");
	assert!(matches!(err, D2oError::NegativeCount { count: -8, at: 23, .. }));
}

#[test]
fn offset_set_drops_overwritten_offsets() {
	let bytes = D2oBuilder::new()
		.class(1, "ns", "Point", &[("x", FieldType::Int)])
		.object(1, 1, Payload::new().i32(1))
		.object(2, 1, Payload::new().i32(2))
		.object(1, 1, Payload::new().i32(3))
		.build();
	let (table, _) = load(bytes);
	let table = table.expect("index parses");
	assert_eq!(table.duplicates(), 1);
	assert_eq!(table.get(1), Some(23));
	let offsets = table.offset_set();
	assert!(offsets.contains(&15));
	assert!(!offsets.contains(&7), "overwritten offset is dropped");
}
