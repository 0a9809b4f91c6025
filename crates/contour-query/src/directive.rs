use bson::Bson;
use serde::{Deserialize, Serialize};

/// What a single projection entry asks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Directive {
    /// `0` or `false`.
    Exclude,
    /// `1` or `true`.
    Include,
    /// Any other string or number. Projected verbatim in place of the field.
    Literal(Bson),
    /// `"$path"`: project the value found at `path`. Stored without the `$`.
    Reference(String),
    /// A value outside the directive alphabet (null, sub-documents, arrays,
    /// dates, ...). Kept so classification can reject it.
    Unsupported(Bson),
}

impl Directive {
    /// Classify a raw projection value.
    ///
    /// Numbers are compared by value, so `0`, `0_i64` and `0.0` all exclude
    /// and `1`, `1_i64` and `1.0` all include.
    pub fn from_bson(value: &Bson) -> Self {
        match value {
            Bson::Boolean(false) | Bson::Int32(0) | Bson::Int64(0) => Directive::Exclude,
            Bson::Boolean(true) | Bson::Int32(1) | Bson::Int64(1) => Directive::Include,
            Bson::Double(d) if *d == 0.0 => Directive::Exclude,
            Bson::Double(d) if *d == 1.0 => Directive::Include,
            Bson::String(s) => match s.strip_prefix('$') {
                Some(path) => Directive::Reference(path.to_string()),
                None => Directive::Literal(value.clone()),
            },
            Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_) => Directive::Literal(value.clone()),
            other => Directive::Unsupported(other.clone()),
        }
    }

    pub fn is_exclude(&self) -> bool {
        matches!(self, Directive::Exclude)
    }

    /// Include, Literal and Reference all keep (or produce) a field.
    pub fn is_inclusive(&self) -> bool {
        matches!(
            self,
            Directive::Include | Directive::Literal(_) | Directive::Reference(_)
        )
    }

    /// Literal and Reference produce a value rather than echo the field.
    pub fn is_computed(&self) -> bool {
        matches!(self, Directive::Literal(_) | Directive::Reference(_))
    }
}

impl From<&Bson> for Directive {
    fn from(value: &Bson) -> Self {
        Directive::from_bson(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_false_exclude() {
        for v in [
            Bson::Int32(0),
            Bson::Int64(0),
            Bson::Double(0.0),
            Bson::Double(-0.0),
            Bson::Boolean(false),
        ] {
            assert_eq!(Directive::from_bson(&v), Directive::Exclude, "{v:?}");
        }
    }

    #[test]
    fn one_and_true_include() {
        for v in [
            Bson::Int32(1),
            Bson::Int64(1),
            Bson::Double(1.0),
            Bson::Boolean(true),
        ] {
            assert_eq!(Directive::from_bson(&v), Directive::Include, "{v:?}");
        }
    }

    #[test]
    fn dollar_string_is_reference() {
        let d = Directive::from_bson(&Bson::String("$addr.city".into()));
        assert_eq!(d, Directive::Reference("addr.city".into()));
        assert!(d.is_inclusive());
        assert!(d.is_computed());
    }

    #[test]
    fn other_primitives_are_literals() {
        let d = Directive::from_bson(&Bson::String("hello".into()));
        assert_eq!(d, Directive::Literal(Bson::String("hello".into())));

        let d = Directive::from_bson(&Bson::Int32(5));
        assert_eq!(d, Directive::Literal(Bson::Int32(5)));

        let d = Directive::from_bson(&Bson::Double(2.5));
        assert!(matches!(d, Directive::Literal(Bson::Double(_))));
    }

    #[test]
    fn non_primitives_are_unsupported() {
        let d = Directive::from_bson(&Bson::Null);
        assert_eq!(d, Directive::Unsupported(Bson::Null));
        assert!(!d.is_inclusive());
        assert!(!d.is_exclude());

        let d = Directive::from_bson(&Bson::Document(bson::doc! { "x": 1 }));
        assert!(matches!(d, Directive::Unsupported(Bson::Document(_))));
    }
}
