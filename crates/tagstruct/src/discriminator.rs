//! Discriminated unions.
//!
//! A discriminator schema picks one of several branch schemas based on the
//! string value of a single field of the object being validated, the
//! *discriminant*:
//!
//! ```rust
//! use tagstruct::{discriminator, number, object, open_object, string, validate};
//! use serde_json::json;
//!
//! let schema = discriminator("kind", &[
//!     ("a", object(&[("c", number())])),
//!     ("b", open_object(&[("d", string())])),
//! ])?;
//!
//! assert!(validate(&json!({ "kind": "a", "c": 1 }), &schema).is_ok());
//!
//! let err = validate(&json!({ "kind": "c" }), &schema).unwrap_err();
//! assert_eq!(err.message(), "Expected 'kind' to be one of 'a', 'b', but received: 'c'");
//! # Ok::<(), tagstruct::SchemaError>(())
//! ```
//!
//! Once a branch is selected, the discriminant field is pinned to the
//! selected tag by extending the branch with `{ field: literal(tag) }`, so
//! the resolved schema validates the discriminant along with everything else.
//!
//! Branches may themselves be discriminators. Extending a nested
//! discriminator pushes the pinned field down into every one of its branches
//! instead of wrapping it, which keeps the inner discriminator's own
//! messages intact.

use crate::assign::assign;
use crate::context::Context;
use crate::errors::SchemaError;
use crate::print::print;
use crate::schema::{literal, Entry, Schema};
use crate::shape::Shape;
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;

/// A discriminant field and the branch schema for each of its tags.
#[derive(Debug, Clone, PartialEq)]
pub struct Discriminator {
    field: String,
    mapping: Arc<IndexMap<String, Schema>>,
}

/// Build a discriminator schema over `field`.
///
/// The mapping is copied, so the schema cannot change after construction.
/// Tags keep their declaration order, which is the order they are listed in
/// error messages.
pub fn discriminator(field: &str, mapping: &[(&str, Schema)]) -> Result<Schema, SchemaError> {
    let mut branches = IndexMap::with_capacity(mapping.len());
    for (tag, schema) in mapping {
        if branches.insert(tag.to_string(), schema.clone()).is_some() {
            return Err(SchemaError::DuplicateBranch {
                field: field.to_string(),
                tag: tag.to_string(),
            });
        }
    }
    Ok(Schema::Discriminator(Discriminator::new(field, branches)?))
}

impl Discriminator {
    /// Validate the construction inputs and take ownership of the mapping.
    ///
    /// Rejects an empty field name, an empty mapping, and branches that are
    /// neither object shapes nor discriminators.
    pub fn new(
        field: impl Into<String>,
        mapping: IndexMap<String, Schema>,
    ) -> Result<Self, SchemaError> {
        let field = field.into();
        if field.is_empty() {
            return Err(SchemaError::EmptyField);
        }
        if mapping.is_empty() {
            return Err(SchemaError::EmptyMapping { field });
        }
        for (tag, branch) in &mapping {
            match branch {
                Schema::Object(_) | Schema::Discriminator(_) => {}
                other => {
                    return Err(SchemaError::UnsupportedBranch {
                        tag: tag.clone(),
                        kind: other.type_name(),
                    })
                }
            }
        }

        Ok(Self {
            field,
            mapping: Arc::new(mapping),
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn mapping(&self) -> &IndexMap<String, Schema> {
        &self.mapping
    }

    /// Tags in declaration order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.mapping.keys().map(String::as_str)
    }

    /// The discriminant of `value`, if it is an object carrying a string there.
    fn tag_of<'v>(&self, value: Option<&'v Value>) -> Option<&'v str> {
        match value {
            Some(Value::Object(object)) => object.get(&self.field)?.as_str(),
            _ => None,
        }
    }

    /// Resolve the schema that governs `value`.
    ///
    /// Returns `None` when `value` is not an object, has no string
    /// discriminant, or carries an unknown tag. Otherwise returns the branch
    /// extended with the discriminant pinned to the tag.
    pub fn select_branch(&self, value: Option<&Value>) -> Option<Schema> {
        let tag = self.tag_of(value)?;
        let branch = self.mapping.get(tag)?;

        let pin = Schema::Object(Shape::strict(IndexMap::from([(
            self.field.clone(),
            literal(tag),
        )])));

        match extend(branch, &pin) {
            Ok(schema) => {
                tracing::debug!(field = %self.field, tag, "resolved discriminator branch");
                Some(schema)
            }
            Err(err) => {
                tracing::warn!(field = %self.field, tag, error = %err, "cannot extend branch");
                None
            }
        }
    }

    /// Validate `value` against the discriminant, then defer to the
    /// resolved branch. The first applicable rule decides the message.
    pub fn check(&self, value: Option<&Value>, ctx: &Context<'_>) -> Result<(), String> {
        let Some(Value::Object(object)) = value else {
            return Err(format!(
                "Expected an object, but received: {}",
                print(value)
            ));
        };

        let Some(Value::String(tag)) = object.get(&self.field) else {
            return Err(format!(
                "Expected an object with '{}' property, but received: {}",
                self.field,
                print(value)
            ));
        };

        if !self.mapping.contains_key(tag.as_str()) {
            let expected = self
                .tags()
                .map(|key| format!("'{}'", key))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(format!(
                "Expected '{}' to be one of {}, but received: '{}'",
                self.field, expected, tag
            ));
        }

        match self.select_branch(value) {
            Some(branch) => branch.check(value, ctx),
            None => {
                tracing::warn!(field = %self.field, tag = %tag, "no branch resolved for known tag");
                Ok(())
            }
        }
    }

    /// Entries of the resolved branch, or none when no branch resolves.
    pub fn entries<'v>(&self, value: Option<&'v Value>, ctx: &Context<'_>) -> Vec<Entry<'v>> {
        self.select_branch(value)
            .map(|branch| branch.entries(value, ctx))
            .unwrap_or_default()
    }
}

/// Fold the constraint `b` into the branch schema `a`.
///
/// A discriminator is rebuilt on the same field with `b` folded into every
/// branch, recursively. Anything else is combined with [`assign`].
pub fn extend(a: &Schema, b: &Schema) -> Result<Schema, SchemaError> {
    match a {
        Schema::Discriminator(inner) => {
            let mapping = inner
                .mapping
                .iter()
                .map(|(tag, branch)| Ok((tag.clone(), extend(branch, b)?)))
                .collect::<Result<IndexMap<_, _>, SchemaError>>()?;

            Ok(Schema::Discriminator(Discriminator {
                field: inner.field.clone(),
                mapping: Arc::new(mapping),
            }))
        }
        _ => assign(a, b),
    }
}
