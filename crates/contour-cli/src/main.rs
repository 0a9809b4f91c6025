mod config;
mod error;

use std::path::Path;

use bson::Document;
use contour::{ResolveOptions, Resolver, Schema, classify, parse_projection};
use tracing::info;

use error::Error;

fn main() {
    // stdout carries the shape; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = config::from_env().and_then(|options| run(&args, options));

    match result {
        Ok(rendered) => println!("{rendered}"),
        Err(e) => {
            eprintln!("contour: {e}");
            std::process::exit(1);
        }
    }
}

/// Resolve `<schema.json> <projection.json>` and render the shape as JSON.
///
/// With `--sample <document.json>` in place of the schema, the schema is
/// inferred from one example document instead.
fn run(args: &[String], options: ResolveOptions) -> Result<String, Error> {
    let (schema, schema_path, projection_path) = match args {
        [flag, sample_path, projection_path] if flag == "--sample" => {
            let sample = read_document(Path::new(sample_path))?;
            (Schema::infer(&sample), sample_path, projection_path)
        }
        [schema_path, projection_path] if !schema_path.starts_with("--") => {
            let descriptor = read_document(Path::new(schema_path))?;
            (Schema::from_descriptor(&descriptor)?, schema_path, projection_path)
        }
        _ => return Err(Error::Usage),
    };
    let projection = parse_projection(&read_document(Path::new(projection_path))?)?;

    let verdict = classify(&projection);
    info!(%verdict, schema = %schema_path, projection = %projection_path, "resolving");

    let resolver = Resolver::new(options);
    let shape = resolver.resolve_classified(&schema, &projection, &verdict)?;
    Ok(serde_json::to_string_pretty(&shape.to_descriptor())?)
}

fn read_document(path: &Path) -> Result<Document, Error> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })
}
