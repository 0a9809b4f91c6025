use bson::{Bson, Document};

use crate::directive::Directive;
use crate::projection::ProjectionSpec;

/// Parse error for projection documents.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionParseError(pub String);

impl std::fmt::Display for ProjectionParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "projection parse error: {}", self.0)
    }
}

impl std::error::Error for ProjectionParseError {}

/// Parse a BSON projection document into a [`ProjectionSpec`].
///
/// Follows MongoDB projection syntax:
/// - `{ "field": 1 }` / `{ "field": true }` includes
/// - `{ "field": 0 }` / `{ "field": false }` excludes
/// - `{ "field": "$other.path" }` projects another field under this name
/// - `{ "field": "text" }` or any other number projects a literal
/// - `{ "a.b": 1 }` addresses nested fields
///
/// Operator projections (`$slice`, `$elemMatch`, `$meta`, ...) are rejected.
/// Values outside the directive alphabet (null, arrays, plain sub-documents)
/// parse as [`Directive::Unsupported`] and are left to classification.
pub fn parse_projection(doc: &Document) -> Result<ProjectionSpec, ProjectionParseError> {
    let mut spec = ProjectionSpec::new();

    for (key, value) in doc {
        validate_key(key)?;
        reject_operator_doc(key, value)?;
        spec.insert(key.as_str(), Directive::from_bson(value));
    }

    Ok(spec)
}

fn validate_key(key: &str) -> Result<(), ProjectionParseError> {
    if key.is_empty() {
        return Err(ProjectionParseError("empty field name".into()));
    }
    if key.starts_with('$') {
        return Err(ProjectionParseError(format!(
            "unknown top-level operator: {key}"
        )));
    }
    if key.split('.').any(str::is_empty) {
        return Err(ProjectionParseError(format!(
            "empty path segment in field: {key}"
        )));
    }
    Ok(())
}

/// `{ "tags": { "$slice": 2 } }` and friends.
fn reject_operator_doc(key: &str, value: &Bson) -> Result<(), ProjectionParseError> {
    if let Bson::Document(sub_doc) = value
        && let Some(op) = sub_doc.keys().next()
        && op.starts_with('$')
    {
        return Err(ProjectionParseError(format!(
            "unsupported projection operator {op} on field {key}"
        )));
    }
    Ok(())
}
