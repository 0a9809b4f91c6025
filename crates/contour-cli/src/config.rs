use contour::{FieldType, ResolveOptions};

use crate::error::Error;

pub const MAX_DEPTH_VAR: &str = "CONTOUR_MAX_DEPTH";
pub const ID_TYPE_VAR: &str = "CONTOUR_ID_TYPE";

/// Resolver options from the process environment.
pub fn from_env() -> Result<ResolveOptions, Error> {
    from_lookup(|name| std::env::var(name).ok())
}

/// Unset variables keep their defaults.
pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<ResolveOptions, Error> {
    let mut options = ResolveOptions::default();

    if let Some(raw) = lookup(MAX_DEPTH_VAR) {
        options.max_depth = raw.trim().parse::<usize>().map_err(|e| Error::Config {
            name: MAX_DEPTH_VAR,
            reason: format!("{e}: {raw}"),
        })?;
    }

    if let Some(name) = lookup(ID_TYPE_VAR) {
        options.id_type = FieldType::from_type_name(name.trim()).ok_or_else(|| Error::Config {
            name: ID_TYPE_VAR,
            reason: format!("unknown type name: {name}"),
        })?;
    }

    Ok(options)
}
