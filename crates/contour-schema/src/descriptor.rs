//! Descriptor notation: a document whose values name field types.
//!
//! ```text
//! { "name": "string",
//!   "created": "date",
//!   "addr": { "city": "string", "zip": "string" },
//!   "tags": ["string"] }
//! ```
//!
//! Leaf names follow the MongoDB `$type` aliases (see [`crate::ScalarType::name`]
//! and [`crate::OpaqueKind::name`]). A sub-document declares an embedded object and
//! a one-element array declares an array of that element type.

use bson::{Bson, Document};

use crate::error::SchemaError;
use crate::field_type::FieldType;
use crate::schema::Schema;

impl Schema {
    /// Build a schema from descriptor notation.
    pub fn from_descriptor(doc: &Document) -> Result<Schema, SchemaError> {
        parse_document(doc, "")
    }

    /// Render this schema back into descriptor notation.
    pub fn to_descriptor(&self) -> Document {
        self.iter()
            .map(|(name, ty)| (name.to_string(), ty.to_descriptor()))
            .collect()
    }
}

impl FieldType {
    pub fn to_descriptor(&self) -> Bson {
        match self {
            FieldType::Scalar(t) => Bson::String(t.name().into()),
            FieldType::Opaque(k) => Bson::String(k.name().into()),
            FieldType::Document(schema) => Bson::Document(schema.to_descriptor()),
            FieldType::Array(item) => Bson::Array(vec![item.to_descriptor()]),
        }
    }
}

fn parse_document(doc: &Document, prefix: &str) -> Result<Schema, SchemaError> {
    let mut schema = Schema::new();
    for (name, value) in doc {
        if name.is_empty() {
            return Err(SchemaError(format!("empty field name under '{prefix}'")));
        }
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        schema.insert(name.as_str(), parse_type(value, &path)?);
    }
    Ok(schema)
}

fn parse_type(value: &Bson, path: &str) -> Result<FieldType, SchemaError> {
    match value {
        Bson::String(name) => FieldType::from_type_name(name)
            .ok_or_else(|| SchemaError(format!("unknown type '{name}' for field {path}"))),
        Bson::Document(sub_doc) => Ok(FieldType::Document(parse_document(sub_doc, path)?)),
        Bson::Array(items) => match items.as_slice() {
            [item] => Ok(FieldType::array(parse_type(item, path)?)),
            _ => Err(SchemaError(format!(
                "array descriptor for field {path} must have exactly one element, got {}",
                items.len()
            ))),
        },
        other => Err(SchemaError(format!(
            "descriptor for field {path} must be a type name, document or array, got {other}"
        ))),
    }
}
