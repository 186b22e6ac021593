//! Validation entry points.
//!
//! A run walks the value depth-first: the schema's own check goes first,
//! then each entry it yields is validated recursively under its key. A failed
//! check does not stop the walk, so a run reports every failure it can
//! reach; callers see the first one in the error message.
//!
//! # Example
//!
//! ```rust
//! use tagstruct::{discriminator, number, object, validate};
//! use serde_json::json;
//!
//! let schema = discriminator("kind", &[("a", object(&[("c", number())]))])?;
//!
//! let err = validate(&json!({ "kind": "a", "c": "test" }), &schema).unwrap_err();
//! assert_eq!(err.message(), "At path: c -- Expected a number, but received: \"test\"");
//! # Ok::<(), tagstruct::SchemaError>(())
//! ```

use crate::context::Context;
use crate::errors::{Failure, ParseError, StructError};
use crate::schema::Schema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options for a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidateOptions {
    /// Ignore keys that strict shapes do not declare.
    pub mask: bool,
    /// Replace the rendered error message with this text.
    pub message: Option<String>,
}

impl ValidateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for a run that ignores undeclared keys.
    pub fn masked() -> Self {
        Self {
            mask: true,
            ..Default::default()
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Validate `value` against `schema`.
pub fn validate(value: &Value, schema: &Schema) -> Result<(), StructError> {
    validate_with(value, schema, &ValidateOptions::default())
}

/// Assert that `value` matches `schema`, for propagation with `?`.
///
/// ```rust
/// use tagstruct::{assert, string, StructError};
/// use serde_json::json;
///
/// fn check_name(name: &serde_json::Value) -> Result<(), StructError> {
///     assert(name, &string())?;
///     Ok(())
/// }
///
/// assert!(check_name(&json!("ok")).is_ok());
/// assert!(check_name(&json!(1)).is_err());
/// ```
pub fn assert(value: &Value, schema: &Schema) -> Result<(), StructError> {
    validate(value, schema)
}

/// Whether `value` matches `schema`.
pub fn is(value: &Value, schema: &Schema) -> bool {
    validate(value, schema).is_ok()
}

/// Validate `value` against `schema` with explicit options.
pub fn validate_with(
    value: &Value,
    schema: &Schema,
    options: &ValidateOptions,
) -> Result<(), StructError> {
    let failures = collect_failures(value, schema, options);
    match StructError::from_failures(failures) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Validate while ignoring undeclared keys, and return a copy of `value`
/// with those keys removed.
pub fn mask(value: &Value, schema: &Schema) -> Result<Value, StructError> {
    validate_with(value, schema, &ValidateOptions::masked())?;
    Ok(strip_undeclared(value, schema))
}

/// Validate `value`, then deserialize it into `T`.
///
/// Pairs naturally with an internally tagged serde enum whose tag matches
/// the discriminant field.
pub fn parse<T: DeserializeOwned>(value: &Value, schema: &Schema) -> Result<T, ParseError> {
    validate(value, schema)?;
    Ok(serde_json::from_value(value.clone())?)
}

/// Run `schema` over `value` and return every failure found.
pub fn collect_failures(value: &Value, schema: &Schema, options: &ValidateOptions) -> Vec<Failure> {
    let mut ctx = Context::new(value).with_mask(options.mask);
    let mut failures = Vec::new();
    run(Some(value), schema, &mut ctx, options, &mut failures);
    failures
}

fn run<'v>(
    value: Option<&'v Value>,
    schema: &Schema,
    ctx: &mut Context<'v>,
    options: &ValidateOptions,
    failures: &mut Vec<Failure>,
) {
    tracing::trace!(path = %ctx.current_path(), schema = schema.type_name(), "validating");

    if let Err(message) = schema.check(value, ctx) {
        failures.push(
            Failure::new(message, schema.type_name(), value, ctx)
                .with_explanation(options.message.clone()),
        );
    }

    for entry in schema.entries(value, ctx) {
        ctx.push(entry.key, entry.value);
        run(entry.value, &entry.schema, ctx, options, failures);
        ctx.pop();
    }
}

fn strip_undeclared(value: &Value, schema: &Schema) -> Value {
    match (schema, value) {
        (Schema::Object(shape), Value::Object(object)) => Value::Object(
            object
                .iter()
                .filter_map(|(key, item)| match shape.fields().get(key) {
                    Some(field) => Some((key.clone(), strip_undeclared(item, field))),
                    None if shape.is_open() => Some((key.clone(), item.clone())),
                    None => None,
                })
                .collect(),
        ),
        (Schema::Array(element), Value::Array(items)) => Value::Array(
            items
                .iter()
                .map(|item| strip_undeclared(item, element))
                .collect(),
        ),
        (Schema::Optional(inner), _) => strip_undeclared(value, inner),
        (Schema::Discriminator(discriminator), _) => {
            match discriminator.select_branch(Some(value)) {
                Some(branch) => strip_undeclared(value, &branch),
                None => value.clone(),
            }
        }
        _ => value.clone(),
    }
}
