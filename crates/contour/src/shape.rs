use std::collections::BTreeMap;

use bson::{Bson, Document, doc};
use contour_schema::{FieldType, OpaqueKind, ScalarType, Schema};
use serde::{Deserialize, Serialize};

/// The type of one field in a projected document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeType {
    Scalar(ScalarType),
    /// Copied unchanged from the schema; never narrowed.
    Opaque(OpaqueKind),
    /// A constant injected by the projection.
    Literal(Bson),
    Document(Shape),
    Array(Box<ShapeType>),
    /// Named by an inclusion projection but not declared by the schema.
    Unknown,
}

impl ShapeType {
    pub fn array(item: ShapeType) -> Self {
        ShapeType::Array(Box::new(item))
    }

    /// Descriptor notation, as [`FieldType::to_descriptor`], plus
    /// `{ "$literal": v }` for literals and `"unknown"`.
    pub fn to_descriptor(&self) -> Bson {
        match self {
            ShapeType::Scalar(t) => Bson::String(t.name().into()),
            ShapeType::Opaque(k) => Bson::String(k.name().into()),
            ShapeType::Literal(v) => Bson::Document(doc! { "$literal": v.clone() }),
            ShapeType::Document(shape) => Bson::Document(shape.to_descriptor()),
            ShapeType::Array(item) => Bson::Array(vec![item.to_descriptor()]),
            ShapeType::Unknown => Bson::String("unknown".into()),
        }
    }

    /// Back to a schema type. `None` if a literal or unknown appears anywhere.
    pub fn into_field_type(self) -> Option<FieldType> {
        Some(match self {
            ShapeType::Scalar(t) => FieldType::Scalar(t),
            ShapeType::Opaque(k) => FieldType::Opaque(k),
            ShapeType::Document(shape) => FieldType::Document(shape.into_schema()?),
            ShapeType::Array(item) => FieldType::array(item.into_field_type()?),
            ShapeType::Literal(_) | ShapeType::Unknown => return None,
        })
    }
}

impl From<&FieldType> for ShapeType {
    fn from(ty: &FieldType) -> Self {
        match ty {
            FieldType::Scalar(t) => ShapeType::Scalar(*t),
            FieldType::Opaque(k) => ShapeType::Opaque(*k),
            FieldType::Document(schema) => ShapeType::Document(Shape::from(schema)),
            FieldType::Array(item) => ShapeType::array(ShapeType::from(item.as_ref())),
        }
    }
}

/// The resolved shape of a projected document: output field to type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shape {
    fields: BTreeMap<String, ShapeType>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, ty: ShapeType) -> Self {
        self.fields.insert(name.into(), ty);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, ty: ShapeType) -> Option<ShapeType> {
        self.fields.insert(name.into(), ty)
    }

    pub fn get(&self, name: &str) -> Option<&ShapeType> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ShapeType)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn to_descriptor(&self) -> Document {
        self.iter()
            .map(|(name, ty)| (name.to_string(), ty.to_descriptor()))
            .collect()
    }

    /// Reinterpret this shape as a schema, e.g. to project a result again.
    pub fn into_schema(self) -> Option<Schema> {
        self.fields
            .into_iter()
            .map(|(name, ty)| Some((name, ty.into_field_type()?)))
            .collect()
    }
}

impl From<&Schema> for Shape {
    fn from(schema: &Schema) -> Self {
        Self {
            fields: schema
                .iter()
                .map(|(name, ty)| (name.to_string(), ShapeType::from(ty)))
                .collect(),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, ShapeType)> for Shape {
    fn from_iter<I: IntoIterator<Item = (K, ShapeType)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
