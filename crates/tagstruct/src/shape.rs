//! Object shapes: records of named field schemas.

use crate::context::{Context, PathSegment};
use crate::print::print;
use crate::schema::{Entry, Schema};
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;

/// A record of named field schemas.
///
/// A strict shape (`object`) rejects keys it does not declare; an open shape
/// (`type`) ignores them. Every declared field is required unless its schema
/// is optional.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    fields: Arc<IndexMap<String, Schema>>,
    open: bool,
}

impl Shape {
    pub fn strict(fields: IndexMap<String, Schema>) -> Self {
        Self {
            fields: Arc::new(fields),
            open: false,
        }
    }

    pub fn open(fields: IndexMap<String, Schema>) -> Self {
        Self {
            fields: Arc::new(fields),
            open: true,
        }
    }

    pub fn fields(&self) -> &IndexMap<String, Schema> {
        &self.fields
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn type_name(&self) -> &'static str {
        if self.open {
            "type"
        } else {
            "object"
        }
    }

    /// Fields of `self` overlaid with those of `other`, keeping `self`'s
    /// strictness. A key declared by both takes `other`'s schema.
    pub fn overlay(&self, other: &Shape) -> Shape {
        let mut fields = (*self.fields).clone();
        for (key, schema) in other.fields.iter() {
            fields.insert(key.clone(), schema.clone());
        }
        Shape {
            fields: Arc::new(fields),
            open: self.open,
        }
    }

    pub(crate) fn check(&self, value: Option<&Value>) -> Result<(), String> {
        match value {
            Some(Value::Object(_)) => Ok(()),
            _ => Err(format!("Expected an object, but received: {}", print(value))),
        }
    }

    pub(crate) fn entries<'v>(&self, value: Option<&'v Value>, ctx: &Context<'_>) -> Vec<Entry<'v>> {
        let Some(Value::Object(object)) = value else {
            return Vec::new();
        };

        let mut entries: Vec<Entry<'v>> = self
            .fields
            .iter()
            .map(|(key, schema)| Entry {
                key: PathSegment::Key(key.clone()),
                value: object.get(key),
                schema: schema.clone(),
            })
            .collect();

        if !self.open && !ctx.is_masked() {
            entries.extend(
                object
                    .iter()
                    .filter(|(key, _)| !self.fields.contains_key(key.as_str()))
                    .map(|(key, item)| Entry {
                        key: PathSegment::Key(key.clone()),
                        value: Some(item),
                        schema: Schema::Never,
                    }),
            );
        }

        entries
    }
}
