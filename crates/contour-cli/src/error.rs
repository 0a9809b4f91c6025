use std::path::PathBuf;

use contour::{ProjectionParseError, ResolveError, SchemaError};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("usage: contour (<schema.json> | --sample <document.json>) <projection.json>")]
    Usage,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {name}: {reason}")]
    Config { name: &'static str, reason: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Projection(#[from] ProjectionParseError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("failed to render shape: {0}")]
    Render(#[from] serde_json::Error),
}
