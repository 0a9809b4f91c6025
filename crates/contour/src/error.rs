use std::fmt;

// ── ProjectionError ───────────────────────────────────────────

/// Why a projection cannot be resolved. Reported by classification, before
/// any resolution work happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    /// Inclusion and exclusion combined on non-`_id` fields.
    Mixed { included: String, excluded: String },
    /// Only `_id` is projected, with a value that neither includes nor
    /// excludes it.
    InvalidIdOnly,
    /// A literal or reference value in an exclusion projection.
    LiteralInExclusion { field: String },
    /// A value outside the directive alphabet (null, sub-document, ...).
    UnsupportedDirective { field: String },
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mixed { included, excluded } => write!(
                f,
                "cannot mix inclusion ({included}) and exclusion ({excluded}) in one projection"
            ),
            Self::InvalidIdOnly => write!(f, "invalid _id-only projection"),
            Self::LiteralInExclusion { field } => {
                write!(f, "literal value for {field} in exclusion projection")
            }
            Self::UnsupportedDirective { field } => {
                write!(f, "unsupported projection value for {field}")
            }
        }
    }
}

impl std::error::Error for ProjectionError {}

// ── ResolveError ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    Projection(ProjectionError),
    DepthLimitExceeded { path: String, limit: usize },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Projection(e) => write!(f, "invalid projection: {e}"),
            Self::DepthLimitExceeded { path, limit } => {
                write!(f, "nesting deeper than {limit} levels at {path}")
            }
        }
    }
}

impl std::error::Error for ResolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Projection(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ProjectionError> for ResolveError {
    fn from(e: ProjectionError) -> Self {
        Self::Projection(e)
    }
}
