use std::collections::BTreeMap;

use contour_query::{Directive, ProjectionSpec};

/// One level of a projection, keyed by field name.
pub(crate) type ProjectionLevel<'a> = BTreeMap<&'a str, ProjectionTree<'a>>;

/// Projection directives grouped by root key.
///
/// Given `{ "addr.city": 1, "addr.zip": 1, "name": 1 }`, builds:
/// ```text
/// { "addr": Branch({ "city": Leaf(Include), "zip": Leaf(Include) }),
///   "name": Leaf(Include) }
/// ```
///
/// Borrows keys and directives from the `ProjectionSpec`; built once per
/// resolution.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ProjectionTree<'a> {
    /// A directive for the whole field.
    Leaf(&'a Directive),
    /// A nested projection for the field's sub-paths.
    Branch(ProjectionLevel<'a>),
}

impl<'a> ProjectionTree<'a> {
    pub(crate) fn from_spec(spec: &'a ProjectionSpec) -> ProjectionLevel<'a> {
        let mut root = ProjectionLevel::new();
        for (path, directive) in spec.iter() {
            insert_path(&mut root, path, directive);
        }
        root
    }
}

fn insert_path<'a>(map: &mut ProjectionLevel<'a>, remaining: &'a str, directive: &'a Directive) {
    match remaining.split_once('.') {
        None => {
            // Leaf takes the whole field. Overrides any existing Branch
            // (if someone asks for both "addr" and "addr.city", "addr" wins).
            map.insert(remaining, ProjectionTree::Leaf(directive));
        }
        Some((top, rest)) => {
            let entry = map
                .entry(top)
                .or_insert_with(|| ProjectionTree::Branch(ProjectionLevel::new()));
            if let ProjectionTree::Branch(children) = entry {
                insert_path(children, rest, directive);
            }
        }
    }
}
