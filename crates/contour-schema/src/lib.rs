mod descriptor;
mod error;
mod field_type;
mod infer;
mod schema;

pub use error::SchemaError;
pub use field_type::{FieldType, OpaqueKind, ScalarType};
pub use schema::Schema;
