use std::io::Cursor;

use d2odoc_testkit::{D2oBuilder, FieldType, Payload};

use crate::d2o::{ContainerKind, D2oError, D2oFile, DecodeOptions, Value};

fn servers() -> D2oBuilder {
	D2oBuilder::new()
		.class(
			1,
			"com.ankamagames.dofus.datacenter.servers",
			"Server",
			&[
				("id", FieldType::Int),
				("nameId", FieldType::I18n),
				("language", FieldType::String),
				("population", FieldType::Object(2)),
				("restrictedToLanguages", FieldType::vector(FieldType::String)),
			],
		)
		.class(2, "com.ankamagames.dofus.datacenter.servers", "ServerPopulation", &[("id", FieldType::Int), ("weight", FieldType::Number)])
		.object(
			5,
			1,
			Payload::new().i32(5).i32(1001).string("fr").reference(100).count(2).string("fr").string("en"),
		)
		.object(9, 1, Payload::new().i32(9).i32(1002).string("en").null_ref().count(0))
		.object(100, 2, Payload::new().i32(100).f64(0.75))
}

fn open(bytes: Vec<u8>) -> D2oFile<Cursor<Vec<u8>>> {
	D2oFile::from_source(Cursor::new(bytes)).expect("container opens")
}

#[test]
fn decode_all_yields_one_object_per_index_entry() {
	let mut file = open(servers().build());
	assert_eq!(file.header.kind, ContainerKind::Plain);

	let objects = file.objects().expect("decode all succeeds");
	assert_eq!(objects.len(), file.index().len());
	let names: Vec<_> = objects.iter().map(|item| item.class_name.as_ref()).collect();
	assert_eq!(names, vec!["Server", "Server", "ServerPopulation"]);
}

#[test]
fn every_indexed_id_decodes_with_schema_fields() {
	let mut file = open(servers().build());
	for id in file.index().ids() {
		let object = file.object(id).expect("indexed id decodes");
		let schema = file.classes().get(object.class_id).expect("schema exists");
		let expected: Vec<_> = schema.fields.iter().map(|field| field.name.clone()).collect();
		let got: Vec<_> = object.fields.iter().map(|field| field.name.clone()).collect();
		assert_eq!(got, expected, "field names for id {id}");
	}
}

#[test]
fn lookups_are_independent_of_call_order() {
	let mut file = open(servers().build());
	let nine_first = file.object(9).expect("id 9");
	let five_second = file.object(5).expect("id 5");
	let five_first = file.object(5).expect("id 5 again");
	let nine_second = file.object(9).expect("id 9 again");

	assert_eq!(nine_first, nine_second);
	assert_eq!(five_first, five_second);
	assert_eq!(five_first.get("language").and_then(Value::as_str), Some("fr"));
	assert_eq!(nine_first.get("population"), Some(&Value::Null));
	assert_eq!(nine_first.get("restrictedToLanguages"), Some(&Value::Array(Vec::new())));

	let population = five_first.get("population").and_then(Value::as_object).expect("population resolved");
	assert_eq!(population.get("weight"), Some(&Value::F64(0.75)));
}

#[test]
fn plain_and_wrapped_containers_decode_identically() {
	let mut plain = open(servers().build());
	let mut wrapped = open(servers().build_wrapped(1, &[0xAB; 37]));

	assert!(matches!(wrapped.header.kind, ContainerKind::Aksd { version: 1, blob_len: 37, .. }));
	assert_eq!(plain.objects().expect("plain decodes"), wrapped.objects().expect("wrapped decodes"));
	assert_eq!(plain.object(5).expect("plain id 5"), wrapped.object(5).expect("wrapped id 5"));
}

#[test]
fn invalid_tag_fails_open() {
	let bytes = servers().class(3, "ns", "Broken", &[("bad", FieldType::Raw(0))]).build();
	let err = D2oFile::from_source(Cursor::new(bytes)).err().expect("open fails");
	assert!(matches!(err, D2oError::InvalidTypeTag { class_id: 3, tag: 0, .. }));
}

#[test]
fn invalid_header_fails_open() {
	let err = D2oFile::from_source(Cursor::new(b"\x00\x02XX".to_vec())).err().expect("open fails");
	assert!(matches!(err, D2oError::InvalidHeader { .. }));
}

#[test]
fn objects_by_id_are_sorted() {
	let mut file = open(servers().build());
	let ids: Vec<_> = file
		.objects_by_id(&DecodeOptions::default())
		.expect("keyed decode succeeds")
		.into_iter()
		.map(|(id, _)| id)
		.collect();
	assert_eq!(ids, vec![5, 9, 100]);
}

#[test]
fn sibling_handles_share_tables_across_threads() {
	let bytes = servers().build();
	let file = open(bytes.clone());

	std::thread::scope(|scope| {
		let handles: Vec<_> = [5, 9, 100]
			.into_iter()
			.map(|id| {
				let mut sibling = file.with_source(Cursor::new(bytes.clone())).expect("sibling handle");
				scope.spawn(move || sibling.object(id).expect("sibling decodes"))
			})
			.collect();

		let ids: Vec<_> = handles
			.into_iter()
			.map(|handle| handle.join().expect("thread completes"))
			.map(|object| object.get("id").and_then(Value::as_i32))
			.collect();
		assert_eq!(ids, vec![Some(5), Some(9), Some(100)]);
	});
}
