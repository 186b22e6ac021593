//! Error types for tagstruct.
//!
//! Validation failures are collected as [`Failure`] records during a run and
//! surfaced to callers as a [`StructError`]. Misuse of the schema constructors
//! is reported through [`SchemaError`].

use crate::context::{Context, PathSegment};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// A single validation failure with its location.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    /// The value that failed, `None` when the field was absent.
    pub value: Option<Value>,

    /// The last path segment, `None` at the root.
    pub key: Option<PathSegment>,

    /// Type name of the schema that rejected the value
    /// (`"string"`, `"object"`, `"discriminator"`, ...).
    pub type_name: &'static str,

    /// Human-readable message produced by the schema's validator.
    pub message: String,

    /// Caller-supplied replacement for the rendered message.
    pub explanation: Option<String>,

    /// Path from the root value to the failing value.
    pub path: Vec<PathSegment>,

    /// Ancestor values from the root down to the failing value.
    pub branch: Vec<Option<Value>>,
}

impl Failure {
    /// Record a failure for `value` at the context's current location.
    pub fn new(
        message: impl Into<String>,
        type_name: &'static str,
        value: Option<&Value>,
        ctx: &Context<'_>,
    ) -> Self {
        Self {
            value: value.cloned(),
            key: ctx.path().last().cloned(),
            type_name,
            message: message.into(),
            explanation: None,
            path: ctx.path().to_vec(),
            branch: ctx.branch().iter().copied().map(|v| v.cloned()).collect(),
        }
    }

    /// Set the explanation that replaces the rendered message.
    pub fn with_explanation(mut self, explanation: Option<String>) -> Self {
        self.explanation = explanation;
        self
    }

    /// The path joined with dots; empty at the root.
    pub fn path_string(&self) -> String {
        self.path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "At path: {} -- {}", self.path_string(), self.message)
        }
    }
}

/// The error returned when a value does not match a schema.
///
/// The message describes the first failure found. Every failure from the run
/// stays available through [`StructError::failures`].
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct StructError {
    message: String,
    failures: Vec<Failure>,
}

impl StructError {
    /// Build an error from the failures of a run; `None` if there were none.
    pub fn from_failures(failures: Vec<Failure>) -> Option<Self> {
        let first = failures.first()?;
        let message = first
            .explanation
            .clone()
            .unwrap_or_else(|| first.to_string());
        Some(Self { message, failures })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The failure the message was rendered from.
    pub fn failure(&self) -> &Failure {
        // from_failures never builds an error without failures
        &self.failures[0]
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn path(&self) -> &[PathSegment] {
        &self.failure().path
    }

    pub fn key(&self) -> Option<&PathSegment> {
        self.failure().key.as_ref()
    }

    pub fn value(&self) -> Option<&Value> {
        self.failure().value.as_ref()
    }

    pub fn type_name(&self) -> &'static str {
        self.failure().type_name
    }

    pub fn branch(&self) -> &[Option<Value>] {
        &self.failure().branch
    }
}

/// Errors raised while building or combining schemas.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Discriminant field name must not be empty")]
    EmptyField,

    #[error("Discriminator on '{field}' needs at least one branch")]
    EmptyMapping { field: String },

    #[error("Duplicate branch '{tag}' for discriminant '{field}'")]
    DuplicateBranch { field: String, tag: String },

    #[error("Branch '{tag}' must be an object shape or a discriminator, got `{kind}`")]
    UnsupportedBranch { tag: String, kind: &'static str },

    #[error("Cannot assign a `{kind}` schema, expected an object shape")]
    NotAnObjectShape { kind: &'static str },
}

/// Errors from [`crate::parse`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Validation(#[from] StructError),

    #[error("Validated value does not deserialize: {0}")]
    Deserialize(#[from] serde_json::Error),
}
