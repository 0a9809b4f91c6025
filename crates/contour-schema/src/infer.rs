use bson::{Bson, Document};

use crate::field_type::{FieldType, OpaqueKind, ScalarType};
use crate::schema::Schema;

impl Schema {
    /// Derive a schema from a sample document.
    ///
    /// Arrays take their element type from the elements; an empty array or
    /// one whose elements disagree becomes an array of `any`.
    pub fn infer(sample: &Document) -> Schema {
        sample
            .iter()
            .map(|(name, value)| (name.as_str(), FieldType::infer(value)))
            .collect()
    }
}

impl FieldType {
    /// Type of a single sample value.
    pub fn infer(value: &Bson) -> FieldType {
        match value {
            Bson::String(_) => ScalarType::String.into(),
            Bson::Int32(_) => ScalarType::Int32.into(),
            Bson::Int64(_) => ScalarType::Int64.into(),
            Bson::Double(_) => ScalarType::Double.into(),
            Bson::Decimal128(_) => ScalarType::Decimal128.into(),
            Bson::Boolean(_) => ScalarType::Boolean.into(),
            Bson::Null => ScalarType::Null.into(),
            Bson::DateTime(_) => OpaqueKind::Date.into(),
            Bson::ObjectId(_) => OpaqueKind::ObjectId.into(),
            Bson::Binary(_) => OpaqueKind::Binary.into(),
            Bson::JavaScriptCode(_) | Bson::JavaScriptCodeWithScope(_) => OpaqueKind::Code.into(),
            Bson::RegularExpression(_) => OpaqueKind::RegularExpression.into(),
            Bson::Timestamp(_) => OpaqueKind::Timestamp.into(),
            Bson::Symbol(_) => OpaqueKind::Symbol.into(),
            Bson::Document(doc) => FieldType::Document(Schema::infer(doc)),
            Bson::Array(items) => FieldType::array(infer_items(items)),
            _ => ScalarType::Any.into(),
        }
    }
}

fn infer_items(items: &[Bson]) -> FieldType {
    let mut types = items.iter().map(FieldType::infer);
    let Some(first) = types.next() else {
        return ScalarType::Any.into();
    };
    if types.all(|t| t == first) {
        first
    } else {
        ScalarType::Any.into()
    }
}
