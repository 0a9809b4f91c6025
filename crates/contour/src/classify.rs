use std::fmt;

use contour_query::{Directive, ID_FIELD, ProjectionSpec};

use crate::error::ProjectionError;

/// The kind of a projection, decided without looking at any schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Whitelists fields; may also exclude `_id`.
    Inclusion,
    /// Blacklists fields; may also include `_id`. Also the verdict for `{}`.
    Exclusion,
    /// `{ _id: 1 }` and friends: only `_id` is projected.
    IdOnlyIncluded,
    /// `{ _id: 0 }`: everything but `_id`.
    IdOnlyExcluded,
    Invalid(ProjectionError),
}

impl Verdict {
    pub fn is_inclusion(&self) -> bool {
        matches!(self, Verdict::Inclusion | Verdict::IdOnlyIncluded)
    }

    pub fn is_exclusion(&self) -> bool {
        matches!(self, Verdict::Exclusion | Verdict::IdOnlyExcluded)
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Verdict::Invalid(_))
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Inclusion => f.write_str("inclusion"),
            Verdict::Exclusion => f.write_str("exclusion"),
            Verdict::IdOnlyIncluded => f.write_str("_id-only inclusion"),
            Verdict::IdOnlyExcluded => f.write_str("_id-only exclusion"),
            Verdict::Invalid(e) => write!(f, "invalid ({e})"),
        }
    }
}

/// Decide whether a projection includes, excludes, or is invalid.
///
/// Follows MongoDB semantics:
/// - `{}` returns the whole document, so it is an exclusion of nothing
/// - non-`_id` fields must all exclude or all include; literals and
///   references count as inclusion
/// - `_id` is exempt from that rule, except that it may not carry a literal
///   or reference inside an exclusion
pub fn classify(projection: &ProjectionSpec) -> Verdict {
    if projection.is_empty() {
        return Verdict::Exclusion;
    }

    let mut included: Option<&str> = None;
    let mut excluded: Option<&str> = None;

    for (field, directive) in projection.fields() {
        if directive.is_exclude() {
            excluded.get_or_insert(field);
        } else if directive.is_inclusive() {
            included.get_or_insert(field);
        } else {
            return Verdict::Invalid(ProjectionError::UnsupportedDirective {
                field: field.to_string(),
            });
        }
    }

    let id = projection.id();
    match (included, excluded) {
        (Some(included), Some(excluded)) => Verdict::Invalid(ProjectionError::Mixed {
            included: included.to_string(),
            excluded: excluded.to_string(),
        }),
        (Some(_), None) => match id {
            Some(Directive::Unsupported(_)) => Verdict::Invalid(unsupported_id()),
            _ => Verdict::Inclusion,
        },
        (None, Some(_)) => match id {
            Some(d) if d.is_computed() => Verdict::Invalid(ProjectionError::LiteralInExclusion {
                field: ID_FIELD.to_string(),
            }),
            Some(Directive::Unsupported(_)) => Verdict::Invalid(unsupported_id()),
            _ => Verdict::Exclusion,
        },
        // Non-empty with no other fields: only `_id` is present.
        (None, None) => match id {
            Some(d) if d.is_exclude() => Verdict::IdOnlyExcluded,
            Some(d) if d.is_inclusive() => Verdict::IdOnlyIncluded,
            _ => Verdict::Invalid(ProjectionError::InvalidIdOnly),
        },
    }
}

fn unsupported_id() -> ProjectionError {
    ProjectionError::UnsupportedDirective {
        field: ID_FIELD.to_string(),
    }
}
