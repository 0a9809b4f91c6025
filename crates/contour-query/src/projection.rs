use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ID_FIELD;
use crate::directive::Directive;

/// A projection: field path (dot notation allowed) to directive.
///
/// Keys are kept sorted, so iteration order is deterministic regardless of
/// the order the projection was written in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectionSpec {
    directives: BTreeMap<String, Directive>,
}

impl ProjectionSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, path: impl Into<String>, directive: Directive) -> Self {
        self.directives.insert(path.into(), directive);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, directive: Directive) -> Option<Directive> {
        self.directives.insert(path.into(), directive)
    }

    pub fn get(&self, path: &str) -> Option<&Directive> {
        self.directives.get(path)
    }

    /// The directive for the root `_id` field, if any.
    pub fn id(&self) -> Option<&Directive> {
        self.directives.get(ID_FIELD)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.directives.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Directive)> {
        self.directives.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Every entry except the root `_id`.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Directive)> {
        self.iter().filter(|(k, _)| *k != ID_FIELD)
    }
}

impl<K: Into<String>> FromIterator<(K, Directive)> for ProjectionSpec {
    fn from_iter<I: IntoIterator<Item = (K, Directive)>>(iter: I) -> Self {
        Self {
            directives: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_skip_id() {
        let spec = ProjectionSpec::new()
            .with("_id", Directive::Exclude)
            .with("name", Directive::Include);
        let keys: Vec<_> = spec.fields().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["name"]);
        assert_eq!(spec.id(), Some(&Directive::Exclude));
        assert_eq!(spec.len(), 2);
    }

    #[test]
    fn later_insert_replaces() {
        let mut spec = ProjectionSpec::new();
        assert_eq!(spec.insert("a", Directive::Include), None);
        assert_eq!(
            spec.insert("a", Directive::Exclude),
            Some(Directive::Include)
        );
        assert_eq!(spec.get("a"), Some(&Directive::Exclude));
    }

    #[test]
    fn iteration_is_sorted() {
        let spec: ProjectionSpec = [
            ("zip", Directive::Include),
            ("addr.city", Directive::Include),
            ("name", Directive::Include),
        ]
        .into_iter()
        .collect();
        let keys: Vec<_> = spec.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["addr.city", "name", "zip"]);
    }
}
