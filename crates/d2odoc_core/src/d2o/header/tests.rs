use std::io::Cursor;

use d2odoc_testkit::{D2oBuilder, FieldType, Payload};

use crate::d2o::{ByteReader, ContainerKind, D2oError, D2oHeader};

fn parse(bytes: Vec<u8>) -> crate::d2o::Result<D2oHeader> {
	let mut reader = ByteReader::new(Cursor::new(bytes)).expect("reader wraps cursor");
	D2oHeader::parse(&mut reader)
}

fn sample() -> D2oBuilder {
	D2oBuilder::new()
		.class(1, "ns", "Point", &[("x", FieldType::Int)])
		.object(10, 1, Payload::new().i32(4))
}

#[test]
fn detects_plain_container() {
	let header = parse(sample().build()).expect("plain header parses");
	assert_eq!(header.kind, ContainerKind::Plain);
	assert_eq!(header.header_offset, 0);
	assert_eq!(header.records_offset(), 7);
	assert_eq!(header.index_offset, 15);
}

#[test]
fn detects_aksd_wrapped_container() {
	let header = parse(sample().build_wrapped(3, b"i18n-blob")).expect("wrapped header parses");
	let wrapper = 2 + 4 + 2 + 4;
	assert_eq!(
		header.kind,
		ContainerKind::Aksd {
			version: 3,
			blob_offset: wrapper as u64,
			blob_len: 9,
		}
	);
	assert_eq!(header.header_offset, (wrapper + 9) as u64);
	assert_eq!(header.records_offset(), header.header_offset + 7);
	assert_eq!(header.index_offset, header.header_offset + 15);
}

#[test]
fn rejects_unknown_wrapper_marker() {
	let err = parse(b"\x00\x04ABCD\x00\x01\x00\x00\x00\x00D2O".to_vec()).expect_err("bad wrapper");
	assert!(matches!(err, D2oError::InvalidHeader { at: 0, .. }));
}

#[test]
fn rejects_wrapper_without_d2o_marker() {
	let err = parse(b"\x00\x04AKSD\x00\x01\x00\x00\x00\x02zzXYZ\x00\x00\x00\x00".to_vec()).expect_err("missing D2O");
	assert!(matches!(err, D2oError::InvalidHeader { at: 14, .. }));
}

#[test]
fn truncated_source_is_an_io_failure() {
	let err = parse(b"D2".to_vec()).expect_err("too short");
	assert!(matches!(err, D2oError::UnexpectedEof { at: 0, need: 3 }));
}
