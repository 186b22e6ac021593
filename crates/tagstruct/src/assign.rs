//! Intersection of object shapes.
//!
//! `assign` combines two object shapes into one that requires the fields of
//! both, the way a record overlay works:
//!
//! - **Fields**: the union of both shapes, in declaration order
//! - **Conflicts**: the second operand's schema wins for a shared key
//! - **Strictness**: taken from the first operand
//!
//! # Example
//!
//! ```rust
//! use tagstruct::{assign, literal, number, object};
//!
//! let base = object(&[("c", number())]);
//! let pinned = assign(&base, &object(&[("kind", literal("a"))]))?;
//!
//! let shape = pinned.as_shape().unwrap();
//! assert_eq!(shape.fields().len(), 2);
//! # Ok::<(), tagstruct::SchemaError>(())
//! ```

use crate::errors::SchemaError;
use crate::schema::Schema;
use crate::shape::Shape;

/// Combine two object shapes into one requiring both.
pub fn assign(a: &Schema, b: &Schema) -> Result<Schema, SchemaError> {
    let base = shape_of(a)?;
    let overlay = shape_of(b)?;
    Ok(Schema::Object(base.overlay(overlay)))
}

/// Fold several shapes onto `first`, left to right.
///
/// Later overlays take precedence over earlier ones.
pub fn assign_all<'a, I>(first: &Schema, rest: I) -> Result<Schema, SchemaError>
where
    I: IntoIterator<Item = &'a Schema>,
{
    shape_of(first)?;
    rest.into_iter()
        .try_fold(first.clone(), |acc, next| assign(&acc, next))
}

fn shape_of(schema: &Schema) -> Result<&Shape, SchemaError> {
    schema.as_shape().ok_or(SchemaError::NotAnObjectShape {
        kind: schema.type_name(),
    })
}
