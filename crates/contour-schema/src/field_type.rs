use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::Schema;

/// Primitive scalar leaf types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarType {
    String,
    Int32,
    Int64,
    Double,
    Decimal128,
    Boolean,
    Null,
    /// Type not known statically (e.g. an empty sample array).
    Any,
}

impl ScalarType {
    /// Descriptor name, following the MongoDB `$type` aliases.
    pub fn name(self) -> &'static str {
        match self {
            ScalarType::String => "string",
            ScalarType::Int32 => "int",
            ScalarType::Int64 => "long",
            ScalarType::Double => "double",
            ScalarType::Decimal128 => "decimal",
            ScalarType::Boolean => "bool",
            ScalarType::Null => "null",
            ScalarType::Any => "any",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "string" => ScalarType::String,
            "int" => ScalarType::Int32,
            "long" => ScalarType::Int64,
            "double" => ScalarType::Double,
            "decimal" => ScalarType::Decimal128,
            "bool" => ScalarType::Boolean,
            "null" => ScalarType::Null,
            "any" => ScalarType::Any,
            _ => return None,
        })
    }
}

/// Structured BSON values that are treated as atomic leaves.
///
/// Dates, ids, binaries and friends are composite on the wire, but a
/// projection never descends into them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpaqueKind {
    Date,
    ObjectId,
    Binary,
    Code,
    RegularExpression,
    Timestamp,
    Symbol,
}

impl OpaqueKind {
    pub fn name(self) -> &'static str {
        match self {
            OpaqueKind::Date => "date",
            OpaqueKind::ObjectId => "objectId",
            OpaqueKind::Binary => "binData",
            OpaqueKind::Code => "javascript",
            OpaqueKind::RegularExpression => "regex",
            OpaqueKind::Timestamp => "timestamp",
            OpaqueKind::Symbol => "symbol",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "date" => OpaqueKind::Date,
            "objectId" => OpaqueKind::ObjectId,
            "binData" => OpaqueKind::Binary,
            "javascript" => OpaqueKind::Code,
            "regex" => OpaqueKind::RegularExpression,
            "timestamp" => OpaqueKind::Timestamp,
            "symbol" => OpaqueKind::Symbol,
            _ => return None,
        })
    }
}

/// The declared type of a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Scalar(ScalarType),
    Opaque(OpaqueKind),
    Document(Schema),
    Array(Box<FieldType>),
}

impl FieldType {
    pub fn array(item: FieldType) -> Self {
        FieldType::Array(Box::new(item))
    }

    /// Resolve a leaf type name (`"string"`, `"date"`, ...).
    pub fn from_type_name(name: &str) -> Option<Self> {
        ScalarType::from_name(name)
            .map(FieldType::Scalar)
            .or_else(|| OpaqueKind::from_name(name).map(FieldType::Opaque))
    }

    /// Navigate a dotted path below this type.
    ///
    /// Arrays are transparent: each array met along the way is unwrapped to
    /// its element type, as with MongoDB dot notation over arrays of
    /// sub-documents. Opaque and scalar types cannot be descended into.
    pub fn get_by_path(&self, path: &str) -> Option<&FieldType> {
        match self {
            FieldType::Array(item) => item.get_by_path(path),
            FieldType::Document(schema) => schema.get_by_path(path),
            FieldType::Opaque(_) | FieldType::Scalar(_) => None,
        }
    }
}

impl From<ScalarType> for FieldType {
    fn from(t: ScalarType) -> Self {
        FieldType::Scalar(t)
    }
}

impl From<OpaqueKind> for FieldType {
    fn from(k: OpaqueKind) -> Self {
        FieldType::Opaque(k)
    }
}

impl From<Schema> for FieldType {
    fn from(s: Schema) -> Self {
        FieldType::Document(s)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Scalar(t) => f.write_str(t.name()),
            FieldType::Opaque(k) => f.write_str(k.name()),
            FieldType::Document(schema) => {
                f.write_str("{")?;
                for (i, (name, ty)) in schema.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {ty}")?;
                }
                f.write_str("}")
            }
            FieldType::Array(item) => write!(f, "[{item}]"),
        }
    }
}
