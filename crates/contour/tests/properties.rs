mod common;
use common::*;

use bson::{Bson, doc};
use contour::{Directive, ProjectionSpec, Shape, Verdict, classify, resolve};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const FIELDS: &[&str] = &["name", "age", "email", "created", "addr", "tags", "orders"];

fn inclusive(rng: &mut StdRng) -> Directive {
    match rng.gen_range(0..4) {
        0 => Directive::Include,
        1 => Directive::Literal(Bson::String("x".into())),
        2 => Directive::Literal(Bson::Int32(rng.gen_range(2..100))),
        _ => Directive::Reference("name".into()),
    }
}

fn random_fields(rng: &mut StdRng) -> Vec<&'static str> {
    let n = rng.gen_range(1..=FIELDS.len());
    FIELDS.choose_multiple(rng, n).copied().collect()
}

fn random_id(rng: &mut StdRng) -> Option<Directive> {
    match rng.gen_range(0..3) {
        0 => None,
        1 => Some(Directive::Exclude),
        _ => Some(Directive::Include),
    }
}

fn with_id(mut spec: ProjectionSpec, id: Option<Directive>) -> ProjectionSpec {
    if let Some(id) = id {
        spec.insert("_id", id);
    }
    spec
}

// ── Classification ──────────────────────────────────────────────

#[test]
fn uniform_exclusions_classify_as_exclusion() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let spec: ProjectionSpec = random_fields(&mut rng)
            .into_iter()
            .map(|f| (f, Directive::Exclude))
            .collect();
        let spec = with_id(spec, random_id(&mut rng));
        assert_eq!(classify(&spec), Verdict::Exclusion, "{spec:?}");
    }
}

#[test]
fn uniform_inclusions_classify_as_inclusion() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let fields = random_fields(&mut rng);
        let spec: ProjectionSpec = fields
            .into_iter()
            .map(|f| (f, inclusive(&mut rng)))
            .collect();
        let spec = with_id(spec, random_id(&mut rng));
        assert_eq!(classify(&spec), Verdict::Inclusion, "{spec:?}");
    }
}

#[test]
fn mixed_classes_are_invalid() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..200 {
        let mut fields = FIELDS.to_vec();
        fields.shuffle(&mut rng);
        let n = rng.gen_range(2..=fields.len());
        let split = rng.gen_range(1..n);

        let mut spec = ProjectionSpec::new();
        for f in &fields[..split] {
            spec.insert(*f, Directive::Exclude);
        }
        for f in &fields[split..n] {
            spec.insert(*f, inclusive(&mut rng));
        }
        let spec = with_id(spec, random_id(&mut rng));
        assert!(classify(&spec).is_invalid(), "{spec:?}");
    }
}

// ── Resolution ──────────────────────────────────────────────────

#[test]
fn empty_projection_returns_full_schema() {
    let schema = users();
    let shape = resolve(&schema, &ProjectionSpec::new()).unwrap();

    let mut expected = Shape::from(&schema);
    expected.insert("_id", contour::ShapeType::Opaque(contour::OpaqueKind::ObjectId));
    assert_eq!(shape, expected);
}

#[test]
fn inclusion_keys_round_trip() {
    let schema = users();
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..100 {
        let fields = random_fields(&mut rng);
        let exclude_id = rng.gen_bool(0.5);

        let spec: ProjectionSpec = fields.iter().map(|f| (*f, Directive::Include)).collect();
        let spec = with_id(spec, exclude_id.then_some(Directive::Exclude));
        let shape = resolve(&schema, &spec).unwrap();

        let mut expected: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
        if !exclude_id {
            expected.push("_id".into());
        }
        expected.sort();
        assert_eq!(keys(&shape), expected, "{spec:?}");
    }
}

#[test]
fn inclusion_is_idempotent() {
    let schema = users();
    let projections = [
        doc! { "name": 1 },
        doc! { "name": 1, "addr.city": 1 },
        doc! { "addr.geo.lat": 1, "orders.sku": 1, "_id": 0 },
        doc! { "tags": 1, "matrix": 1, "created": 1 },
        doc! { "orders": 1, "addr.zip": 1 },
    ];
    for p in projections {
        let spec = projection(p);
        let once = resolve(&schema, &spec).unwrap();
        let reprojected = once.clone().into_schema().expect("no literals or unknowns");
        let twice = resolve(&reprojected, &spec).unwrap();
        assert_eq!(once, twice, "{spec:?}");
    }
}

#[test]
fn exclusion_keeps_every_unnamed_key() {
    let schema = users();
    let mut rng = StdRng::seed_from_u64(19);
    for _ in 0..100 {
        let fields = random_fields(&mut rng);
        let spec: ProjectionSpec = fields.iter().map(|f| (*f, Directive::Exclude)).collect();
        let shape = resolve(&schema, &spec).unwrap();

        let mut expected: Vec<String> = schema
            .keys()
            .filter(|k| !fields.contains(k))
            .map(str::to_string)
            .collect();
        expected.push("_id".into());
        expected.sort();
        assert_eq!(keys(&shape), expected, "{spec:?}");
    }
}

#[test]
fn inclusion_never_leaks_unnamed_keys() {
    let schema = users();
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..100 {
        let fields = random_fields(&mut rng);
        let spec: ProjectionSpec = fields
            .iter()
            .map(|f| (*f, inclusive(&mut rng)))
            .collect();
        let shape = resolve(&schema, &spec).unwrap();
        for key in shape.keys() {
            assert!(key == "_id" || fields.contains(&key), "{key} leaked from {spec:?}");
        }
    }
}
