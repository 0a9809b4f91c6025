use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::field_type::FieldType;

/// Structural description of a document: field name to declared type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: BTreeMap<String, FieldType>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, ty: impl Into<FieldType>) -> Self {
        self.fields.insert(name.into(), ty.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, ty: impl Into<FieldType>) -> Option<FieldType> {
        self.fields.insert(name.into(), ty.into())
    }

    pub fn get(&self, name: &str) -> Option<&FieldType> {
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

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldType)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Navigate a dotted path starting at this document.
    ///
    /// A field whose declared name is the whole path wins over splitting it.
    /// Otherwise the path is split at the first `.` and the remainder is
    /// resolved below that field (see [`FieldType::get_by_path`]).
    pub fn get_by_path(&self, path: &str) -> Option<&FieldType> {
        if let Some(ty) = self.fields.get(path) {
            return Some(ty);
        }
        let (root, rest) = path.split_once('.')?;
        self.fields.get(root)?.get_by_path(rest)
    }
}

impl<K: Into<String>> FromIterator<(K, FieldType)> for Schema {
    fn from_iter<I: IntoIterator<Item = (K, FieldType)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_type::{OpaqueKind, ScalarType};

    fn people() -> Schema {
        Schema::new()
            .with("name", ScalarType::String)
            .with("created", OpaqueKind::Date)
            .with(
                "friends",
                FieldType::array(
                    Schema::new()
                        .with("name", ScalarType::String)
                        .with("since", OpaqueKind::Date)
                        .into(),
                ),
            )
    }

    #[test]
    fn single_segment() {
        assert_eq!(
            people().get_by_path("name"),
            Some(&FieldType::Scalar(ScalarType::String))
        );
    }

    #[test]
    fn through_array_of_documents() {
        assert_eq!(
            people().get_by_path("friends.since"),
            Some(&FieldType::Opaque(OpaqueKind::Date))
        );
    }

    #[test]
    fn whole_array_field() {
        assert!(matches!(
            people().get_by_path("friends"),
            Some(FieldType::Array(_))
        ));
    }

    #[test]
    fn missing_paths() {
        let s = people();
        assert_eq!(s.get_by_path("age"), None);
        assert_eq!(s.get_by_path("friends.age"), None);
        assert_eq!(s.get_by_path("created.day"), None);
        assert_eq!(s.get_by_path(""), None);
    }

    #[test]
    fn dotted_field_name_wins() {
        let s = Schema::new()
            .with("a.b", ScalarType::Int32)
            .with("a", Schema::new().with("b", ScalarType::String));
        assert_eq!(
            s.get_by_path("a.b"),
            Some(&FieldType::Scalar(ScalarType::Int32))
        );
    }

    #[test]
    fn keys_sorted() {
        let s = people();
        let keys: Vec<_> = s.keys().collect();
        assert_eq!(keys, vec!["created", "friends", "name"]);
    }
}
