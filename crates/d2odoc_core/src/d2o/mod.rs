mod decode;
mod error;
mod file;
mod header;
mod index;
mod reader;
mod schema;
mod value;

/// Big-endian primitive reader over seekable sources.
pub use reader::ByteReader;
/// Object decoding entry points and options.
pub use decode::{DecodeOptions, DecodeTables, NULL_REFERENCE, decode_all, decode_by_id};
/// Error and result aliases.
pub use error::{D2oError, Result};
/// Container facade.
pub use file::D2oFile;
/// Container header detection.
pub use header::{AKSD_MAGIC, ContainerKind, D2O_MAGIC, D2oHeader};
/// Object id to offset table.
pub use index::IndexTable;
/// Class schemas, type tags, and resolved decode plans.
pub use schema::{ClassSchema, ClassTable, DecodePlan, FieldSchema, MAX_VECTOR_NESTING, TYPE_BOOLEAN, TYPE_I18N, TYPE_INT, TYPE_NUMBER, TYPE_STRING, TYPE_UINT, TYPE_VECTOR, VectorPlan};
/// Decoded runtime value types.
pub use value::{FieldValue, ObjectValue, Value};
