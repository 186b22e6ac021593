//! The schema sum type and its primitive constructors.

use crate::context::{Context, PathSegment};
use crate::discriminator::Discriminator;
use crate::print::print;
use crate::shape::Shape;
use indexmap::IndexMap;
use serde_json::{Number, Value};
use std::sync::Arc;

/// A schema describing the values it accepts.
///
/// Schemas are immutable and cheap to clone: compound variants share their
/// payload through `Arc`, so one schema can be built once and reused across
/// threads and validations.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// Rejects every value. Used for keys a strict shape does not declare.
    Never,
    String,
    /// Any JSON number.
    Number,
    /// A JSON number with no fractional part.
    Integer,
    Boolean,
    /// Exactly this value.
    Literal(Value),
    /// An array whose elements all match the inner schema.
    Array(Arc<Schema>),
    /// The inner schema, or an absent value.
    Optional(Arc<Schema>),
    Object(Shape),
    Discriminator(Discriminator),
}

/// A child value paired with the schema that governs it.
#[derive(Debug, Clone)]
pub struct Entry<'v> {
    pub key: PathSegment,
    pub value: Option<&'v Value>,
    pub schema: Schema,
}

impl Schema {
    /// The type tag reported in failures.
    pub fn type_name(&self) -> &'static str {
        match self {
            Schema::Never => "never",
            Schema::String => "string",
            Schema::Number => "number",
            Schema::Integer => "integer",
            Schema::Boolean => "boolean",
            Schema::Literal(_) => "literal",
            Schema::Array(_) => "array",
            Schema::Optional(inner) => inner.type_name(),
            Schema::Object(shape) => shape.type_name(),
            Schema::Discriminator(_) => "discriminator",
        }
    }

    pub fn as_shape(&self) -> Option<&Shape> {
        match self {
            Schema::Object(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn as_discriminator(&self) -> Option<&Discriminator> {
        match self {
            Schema::Discriminator(discriminator) => Some(discriminator),
            _ => None,
        }
    }

    /// Check `value` against this schema alone, without descending into
    /// children. Returns the failure message on mismatch.
    pub fn check(&self, value: Option<&Value>, ctx: &Context<'_>) -> Result<(), String> {
        match self {
            Schema::Never => Err(format!(
                "Expected a value of type `never`, but received: `{}`",
                print(value)
            )),
            Schema::String => match value {
                Some(Value::String(_)) => Ok(()),
                _ => Err(format!("Expected a string, but received: {}", print(value))),
            },
            Schema::Number => match value {
                Some(Value::Number(_)) => Ok(()),
                _ => Err(format!("Expected a number, but received: {}", print(value))),
            },
            Schema::Integer => match value {
                Some(Value::Number(n)) if is_integer(n) => Ok(()),
                _ => Err(format!(
                    "Expected an integer, but received: {}",
                    print(value)
                )),
            },
            Schema::Boolean => match value {
                Some(Value::Bool(_)) => Ok(()),
                _ => Err(format!(
                    "Expected a value of type `boolean`, but received: `{}`",
                    print(value)
                )),
            },
            Schema::Literal(expected) => {
                if value == Some(expected) {
                    Ok(())
                } else {
                    Err(format!(
                        "Expected the literal `{}`, but received: {}",
                        print(Some(expected)),
                        print(value)
                    ))
                }
            }
            Schema::Array(_) => match value {
                Some(Value::Array(_)) => Ok(()),
                _ => Err(format!(
                    "Expected an array value, but received: {}",
                    print(value)
                )),
            },
            Schema::Optional(inner) => match value {
                None => Ok(()),
                Some(_) => inner.check(value, ctx),
            },
            Schema::Object(shape) => shape.check(value),
            Schema::Discriminator(discriminator) => discriminator.check(value, ctx),
        }
    }

    /// The child values of `value` this schema wants validated, each with
    /// its own schema. Computed fresh on every call.
    pub fn entries<'v>(&self, value: Option<&'v Value>, ctx: &Context<'_>) -> Vec<Entry<'v>> {
        match self {
            Schema::Array(element) => match value {
                Some(Value::Array(items)) => items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| Entry {
                        key: PathSegment::Index(index),
                        value: Some(item),
                        schema: (**element).clone(),
                    })
                    .collect(),
                _ => Vec::new(),
            },
            Schema::Optional(inner) => inner.entries(value, ctx),
            Schema::Object(shape) => shape.entries(value, ctx),
            Schema::Discriminator(discriminator) => discriminator.entries(value, ctx),
            _ => Vec::new(),
        }
    }
}

fn is_integer(n: &Number) -> bool {
    n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
}

fn field_map(fields: &[(&str, Schema)]) -> IndexMap<String, Schema> {
    fields
        .iter()
        .map(|(key, schema)| (key.to_string(), schema.clone()))
        .collect()
}

// --- Constructors ---

pub fn never() -> Schema {
    Schema::Never
}

pub fn string() -> Schema {
    Schema::String
}

pub fn number() -> Schema {
    Schema::Number
}

pub fn integer() -> Schema {
    Schema::Integer
}

pub fn boolean() -> Schema {
    Schema::Boolean
}

pub fn literal(value: impl Into<Value>) -> Schema {
    Schema::Literal(value.into())
}

pub fn array(element: Schema) -> Schema {
    Schema::Array(Arc::new(element))
}

pub fn optional(inner: Schema) -> Schema {
    Schema::Optional(Arc::new(inner))
}

/// A strict object shape: every listed field is required and no other key
/// is allowed.
///
/// ```rust
/// use tagstruct::{number, object, validate};
/// use serde_json::json;
///
/// let schema = object(&[("c", number())]);
/// assert!(validate(&json!({ "c": 1 }), &schema).is_ok());
/// assert!(validate(&json!({ "c": 1, "d": 2 }), &schema).is_err());
/// ```
pub fn object(fields: &[(&str, Schema)]) -> Schema {
    Schema::Object(Shape::strict(field_map(fields)))
}

/// An open object shape: every listed field is required, other keys are
/// ignored.
pub fn open_object(fields: &[(&str, Schema)]) -> Schema {
    Schema::Object(Shape::open(field_map(fields)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn check(schema: &Schema, value: Option<&Value>) -> Result<(), String> {
        let root = json!(null);
        schema.check(value, &Context::new(&root))
    }

    #[test]
    fn test_primitive_messages() {
        assert_eq!(
            check(&number(), Some(&json!("test"))).unwrap_err(),
            "Expected a number, but received: \"test\""
        );
        assert_eq!(
            check(&string(), Some(&json!(123))).unwrap_err(),
            "Expected a string, but received: 123"
        );
        assert_eq!(
            check(&integer(), Some(&json!(1.5))).unwrap_err(),
            "Expected an integer, but received: 1.5"
        );
        assert_eq!(
            check(&boolean(), None).unwrap_err(),
            "Expected a value of type `boolean`, but received: `undefined`"
        );
        assert_eq!(
            check(&literal("a"), Some(&json!("b"))).unwrap_err(),
            "Expected the literal `\"a\"`, but received: \"b\""
        );
        assert_eq!(
            check(&never(), Some(&json!(3))).unwrap_err(),
            "Expected a value of type `never`, but received: `3`"
        );
    }

    #[test]
    fn test_integer_accepts_whole_floats() {
        assert!(check(&integer(), Some(&json!(2.0))).is_ok());
        assert!(check(&integer(), Some(&json!(-7))).is_ok());
    }

    #[test]
    fn test_optional_accepts_absent() {
        assert!(check(&optional(string()), None).is_ok());
        assert!(check(&optional(string()), Some(&json!(1))).is_err());
        assert_eq!(optional(string()).type_name(), "string");
    }

    #[test]
    fn test_array_entries_use_indices() {
        let value = json!([1, 2]);
        let ctx = Context::new(&value);
        let entries = array(number()).entries(Some(&value), &ctx);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].key, PathSegment::Index(1));
        assert_eq!(entries[1].value, Some(&json!(2)));
    }

    #[test]
    fn test_primitives_have_no_entries() {
        let value = json!({ "a": 1 });
        let ctx = Context::new(&value);
        assert!(string().entries(Some(&value), &ctx).is_empty());
    }

    #[test]
    fn test_shape_type_names() {
        assert_eq!(object(&[]).type_name(), "object");
        assert_eq!(open_object(&[]).type_name(), "type");
    }
}
