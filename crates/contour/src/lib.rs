mod classify;
mod error;
mod projection_tree;
mod resolve;
mod shape;

pub use classify::{Verdict, classify};
pub use contour_query::{Directive, ID_FIELD, ProjectionParseError, ProjectionSpec, parse_projection};
pub use contour_schema::{FieldType, OpaqueKind, ScalarType, Schema, SchemaError};
pub use error::{ProjectionError, ResolveError};
pub use resolve::{DEFAULT_MAX_DEPTH, ResolveOptions, Resolver, resolve};
pub use shape::{Shape, ShapeType};
