use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, D2oError>;

/// Errors produced while opening and decoding D2O containers.
#[derive(Debug, Error)]
pub enum D2oError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: u64,
		/// Requested bytes.
		need: usize,
	},
	/// Neither a plain nor an `AKSD`-wrapped container was detected.
	#[error("invalid d2o header at offset {at}: {reason}")]
	InvalidHeader {
		/// Offset of the offending marker.
		at: u64,
		/// What did not match.
		reason: &'static str,
	},
	/// A class field carries a type tag with no known encoding.
	#[error("invalid type tag {tag} for field {field} of class {class_id}")]
	InvalidTypeTag {
		/// Class being loaded.
		class_id: i32,
		/// Field whose type failed to resolve.
		field: String,
		/// Offending tag value.
		tag: i32,
	},
	/// A field type nests vectors deeper than the loader accepts.
	#[error("field {field} of class {class_id} nests vectors deeper than {max}")]
	SchemaTooDeep {
		/// Class being loaded.
		class_id: i32,
		/// Field whose type is too deep.
		field: String,
		/// Maximum accepted vector nesting.
		max: usize,
	},
	/// Decode-by-id was given an id absent from the index table.
	#[error("object id {id} not found in index table")]
	IdNotFound {
		/// Requested object id.
		id: i32,
	},
	/// A record's stored class id has no schema.
	#[error("class schema {class_id} not found (record at offset {at})")]
	SchemaNotFound {
		/// Stored class id.
		class_id: i32,
		/// Offset of the record's class id.
		at: u64,
	},
	/// No class matched a requested name or id.
	#[error("class not found: {name}")]
	ClassNotFound {
		/// Requested class name or id.
		name: String,
	},
	/// A length or count field was negative.
	#[error("negative {what} {count} at offset {at}")]
	NegativeCount {
		/// Logical field being read.
		what: &'static str,
		/// Parsed signed value.
		count: i32,
		/// Offset of the value.
		at: u64,
	},
	/// An offset resolved before the start of the source.
	#[error("negative {what} offset {offset}")]
	NegativeOffset {
		/// Logical offset kind.
		what: &'static str,
		/// Resolved absolute offset.
		offset: i64,
	},
	/// Vector element count exceeded the configured limit.
	#[error("vector too large: count={count}, max={max}")]
	VectorTooLarge {
		/// Stored element count.
		count: usize,
		/// Maximum permitted element count.
		max: usize,
	},
	/// Decoder recursion depth exceeded configured limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DecodeDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// An object reference chain led back to an object still being decoded.
	#[error("reference cycle detected at object id {id}")]
	ReferenceCycle {
		/// Object id reached twice.
		id: i32,
	},
	/// Strict layout mode found a scanned record the index table does not point at.
	#[error("record at offset {offset} is not referenced by the index table")]
	RecordNotIndexed {
		/// Offset of the record's class id.
		offset: u64,
	},
}
