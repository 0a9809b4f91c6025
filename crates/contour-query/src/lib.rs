mod directive;
mod parse_projection;
mod projection;

pub use directive::Directive;
pub use parse_projection::{ProjectionParseError, parse_projection};
pub use projection::ProjectionSpec;

/// The document identifier field, exempt from projection uniformity rules.
pub const ID_FIELD: &str = "_id";
