//! tagstruct
//!
//! Composable schemas for `serde_json::Value`, built around a discriminated
//! union combinator:
//!
//! - **Schemas**: primitives, literals, arrays, optionals, strict and open
//!   object shapes
//! - **assign**: intersection of object shapes
//! - **discriminator**: tagged unions selected by a string field, nestable
//! - **Errors**: failures with paths, rendered as `At path: a.b -- message`
//!
//! # Example
//!
//! ```rust
//! use tagstruct::{discriminator, number, object, open_object, string, validate};
//! use serde_json::json;
//!
//! let schema = discriminator("kind", &[
//!     ("a", object(&[("c", number())])),
//!     ("b", discriminator("status", &[
//!         ("success", open_object(&[])),
//!         ("failure", open_object(&[("code", string())])),
//!     ])?),
//! ])?;
//!
//! assert!(validate(&json!({ "kind": "b", "status": "success" }), &schema).is_ok());
//!
//! let err = validate(&json!({ "kind": "b", "status": "failure", "code": 123 }), &schema)
//!     .unwrap_err();
//! assert_eq!(err.message(), "At path: code -- Expected a string, but received: 123");
//! # Ok::<(), tagstruct::SchemaError>(())
//! ```

mod assign;
mod context;
mod discriminator;
mod errors;
mod print;
mod schema;
mod shape;
mod validate;

pub use assign::{assign, assign_all};
pub use context::{Context, PathSegment};
pub use discriminator::{discriminator, extend, Discriminator};
pub use errors::{Failure, ParseError, SchemaError, StructError};
pub use print::print;
pub use schema::{
    array, boolean, integer, literal, never, number, object, open_object, optional, string, Entry,
    Schema,
};
pub use shape::Shape;
pub use validate::{
    assert, collect_failures, is, mask, parse, validate, validate_with, ValidateOptions,
};
