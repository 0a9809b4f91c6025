#![allow(dead_code)]

use bson::Document;
use contour::{ProjectionSpec, Schema, Shape, parse_projection, resolve};

pub fn schema(descriptor: Document) -> Schema {
    Schema::from_descriptor(&descriptor).unwrap()
}

pub fn projection(doc: Document) -> ProjectionSpec {
    parse_projection(&doc).unwrap()
}

/// Resolve and render as descriptor notation, the easiest form to compare.
pub fn shape_of(schema: &Schema, doc: Document) -> Document {
    resolve(schema, &projection(doc)).unwrap().to_descriptor()
}

pub fn keys(shape: &Shape) -> Vec<String> {
    shape.keys().map(str::to_string).collect()
}

/// A user document with every kind of field the resolver distinguishes.
pub fn users() -> Schema {
    schema(bson::doc! {
        "name": "string",
        "age": "int",
        "email": "string",
        "created": "date",
        "avatar": "binData",
        "addr": { "city": "string", "zip": "string", "geo": { "lat": "double", "lng": "double" } },
        "tags": ["string"],
        "orders": [{ "sku": "string", "qty": "int", "placed": "date" }],
        "matrix": [["double"]],
    })
}
