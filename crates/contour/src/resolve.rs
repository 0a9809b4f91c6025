use contour_query::{Directive, ID_FIELD, ProjectionSpec};
use contour_schema::{FieldType, OpaqueKind, Schema};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::classify::{Verdict, classify};
use crate::error::{ProjectionError, ResolveError};
use crate::projection_tree::{ProjectionLevel, ProjectionTree};
use crate::shape::{Shape, ShapeType};

pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// Type of a root `_id` the schema does not declare.
    pub id_type: FieldType,
    /// Embedded documents nested deeper than this fail resolution.
    pub max_depth: usize,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            id_type: FieldType::Opaque(OpaqueKind::ObjectId),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Classify-then-resolve with default options.
pub fn resolve(schema: &Schema, projection: &ProjectionSpec) -> Result<Shape, ResolveError> {
    Resolver::default().resolve(schema, projection)
}

/// Computes the shape a projection produces over a schema.
///
/// Stateless apart from its options; one resolver can serve any number of
/// schemas and projections, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    options: ResolveOptions,
}

impl Resolver {
    pub fn new(options: ResolveOptions) -> Self {
        Self { options }
    }

    /// Classify the projection and, unless it is invalid, resolve it.
    pub fn resolve(&self, schema: &Schema, projection: &ProjectionSpec) -> Result<Shape, ResolveError> {
        let verdict = classify(projection);
        debug!(%verdict, fields = projection.len(), "classified projection");
        self.resolve_classified(schema, projection, &verdict)
    }

    /// Resolve with a verdict the caller already obtained from [`classify`].
    pub fn resolve_classified(
        &self,
        schema: &Schema,
        projection: &ProjectionSpec,
        verdict: &Verdict,
    ) -> Result<Shape, ResolveError> {
        match verdict {
            Verdict::Invalid(e) => Err(e.clone().into()),
            Verdict::Inclusion | Verdict::IdOnlyIncluded => {
                self.resolve_inclusion(schema, projection)
            }
            Verdict::Exclusion | Verdict::IdOnlyExcluded => {
                self.resolve_exclusion(schema, projection)
            }
        }
    }

    /// Keep only the fields the projection names. Callers normally go through
    /// [`Resolver::resolve`], which checks the projection first.
    pub fn resolve_inclusion(
        &self,
        schema: &Schema,
        projection: &ProjectionSpec,
    ) -> Result<Shape, ResolveError> {
        let tree = ProjectionTree::from_spec(projection);
        self.walk(schema).include_document(schema, &tree, "", 0, true)
    }

    /// Keep every field the projection does not name. Callers normally go
    /// through [`Resolver::resolve`], which checks the projection first.
    pub fn resolve_exclusion(
        &self,
        schema: &Schema,
        projection: &ProjectionSpec,
    ) -> Result<Shape, ResolveError> {
        let tree = ProjectionTree::from_spec(projection);
        self.walk(schema).exclude_document(schema, &tree, "", 0, true)
    }

    fn walk<'a>(&'a self, root: &'a Schema) -> Walk<'a> {
        Walk {
            root,
            options: &self.options,
        }
    }
}

/// Per-call recursion state. References always resolve from `root`, however
/// deep the walk is.
struct Walk<'a> {
    root: &'a Schema,
    options: &'a ResolveOptions,
}

impl Walk<'_> {
    fn include_document(
        &self,
        schema: &Schema,
        level: &ProjectionLevel<'_>,
        path: &str,
        depth: usize,
        is_root: bool,
    ) -> Result<Shape, ResolveError> {
        self.check_depth(path, depth)?;
        let mut shape = Shape::new();

        for (&key, node) in level {
            let field_path = join(path, key);
            let resolved = match node {
                ProjectionTree::Leaf(Directive::Exclude) => continue,
                ProjectionTree::Leaf(Directive::Include) => self.declared(schema, key, is_root),
                ProjectionTree::Leaf(Directive::Literal(value)) => ShapeType::Literal(value.clone()),
                ProjectionTree::Leaf(Directive::Reference(reference)) => {
                    match self.root.get_by_path(reference) {
                        Some(ty) => ShapeType::from(ty),
                        None => {
                            trace!(field = %field_path, %reference, "dropping unresolved reference");
                            continue;
                        }
                    }
                }
                ProjectionTree::Leaf(Directive::Unsupported(_)) => {
                    return Err(ProjectionError::UnsupportedDirective { field: field_path }.into());
                }
                ProjectionTree::Branch(children) => match schema.get(key) {
                    Some(ty) => self.include_value(ty, children, &field_path, depth + 1)?,
                    None if is_root && key == ID_FIELD => self.include_value(
                        &self.options.id_type,
                        children,
                        &field_path,
                        depth + 1,
                    )?,
                    None => ShapeType::Unknown,
                },
            };
            shape.insert(key, resolved);
        }

        if is_root && !level.contains_key(ID_FIELD) {
            shape.insert(ID_FIELD, self.declared(schema, ID_FIELD, true));
        }
        Ok(shape)
    }

    /// Narrow one value by a nested projection. Arrays apply it to each
    /// element; opaque objects and scalars are never narrowed.
    fn include_value(
        &self,
        ty: &FieldType,
        children: &ProjectionLevel<'_>,
        path: &str,
        depth: usize,
    ) -> Result<ShapeType, ResolveError> {
        Ok(match ty {
            FieldType::Array(item) => {
                ShapeType::array(self.include_value(item, children, path, depth)?)
            }
            FieldType::Document(schema) => {
                ShapeType::Document(self.include_document(schema, children, path, depth, false)?)
            }
            FieldType::Opaque(_) | FieldType::Scalar(_) => ShapeType::from(ty),
        })
    }

    fn exclude_document(
        &self,
        schema: &Schema,
        level: &ProjectionLevel<'_>,
        path: &str,
        depth: usize,
        is_root: bool,
    ) -> Result<Shape, ResolveError> {
        self.check_depth(path, depth)?;
        let mut shape = Shape::new();

        for (key, ty) in schema.iter() {
            let field_path = join(path, key);
            let resolved = match level.get(key) {
                None | Some(ProjectionTree::Leaf(Directive::Include)) => ShapeType::from(ty),
                Some(ProjectionTree::Leaf(Directive::Exclude)) => continue,
                Some(ProjectionTree::Leaf(directive)) => {
                    return Err(reject_in_exclusion(directive, field_path).into());
                }
                Some(ProjectionTree::Branch(children)) => {
                    self.exclude_value(ty, children, &field_path, depth + 1)?
                }
            };
            shape.insert(key, resolved);
        }

        if is_root && !schema.contains(ID_FIELD) {
            match level.get(ID_FIELD) {
                Some(ProjectionTree::Leaf(Directive::Exclude)) => {}
                None | Some(ProjectionTree::Leaf(Directive::Include)) => {
                    shape.insert(ID_FIELD, ShapeType::from(&self.options.id_type));
                }
                Some(ProjectionTree::Leaf(directive)) => {
                    return Err(reject_in_exclusion(directive, ID_FIELD.to_string()).into());
                }
                // `_id.x` paths: the default id type is opaque, nothing to narrow.
                Some(ProjectionTree::Branch(_)) => {
                    shape.insert(ID_FIELD, ShapeType::from(&self.options.id_type));
                }
            }
        }
        Ok(shape)
    }

    fn exclude_value(
        &self,
        ty: &FieldType,
        children: &ProjectionLevel<'_>,
        path: &str,
        depth: usize,
    ) -> Result<ShapeType, ResolveError> {
        Ok(match ty {
            FieldType::Array(item) => {
                ShapeType::array(self.exclude_value(item, children, path, depth)?)
            }
            FieldType::Document(schema) => {
                ShapeType::Document(self.exclude_document(schema, children, path, depth, false)?)
            }
            FieldType::Opaque(_) | FieldType::Scalar(_) => ShapeType::from(ty),
        })
    }

    /// Declared type of a wholly included field.
    fn declared(&self, schema: &Schema, key: &str, is_root: bool) -> ShapeType {
        match schema.get(key) {
            Some(ty) => ShapeType::from(ty),
            None if is_root && key == ID_FIELD => ShapeType::from(&self.options.id_type),
            None => ShapeType::Unknown,
        }
    }

    fn check_depth(&self, path: &str, depth: usize) -> Result<(), ResolveError> {
        if depth > self.options.max_depth {
            return Err(ResolveError::DepthLimitExceeded {
                path: path.to_string(),
                limit: self.options.max_depth,
            });
        }
        Ok(())
    }
}

fn reject_in_exclusion(directive: &Directive, field: String) -> ProjectionError {
    match directive {
        Directive::Unsupported(_) => ProjectionError::UnsupportedDirective { field },
        _ => ProjectionError::LiteralInExclusion { field },
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}
