//! Shared schemas for the integration tests.

#![allow(dead_code)]

use tagstruct::{discriminator, number, object, open_object, string, Schema};

/// `kind` selects between a strict branch `a` and an open branch `b`.
pub fn kind_schema() -> Schema {
    discriminator(
        "kind",
        &[
            ("a", object(&[("c", number())])),
            ("b", open_object(&[("d", string())])),
        ],
    )
    .expect("kind schema is well formed")
}

/// `status` discriminator used as a nested branch.
pub fn status_schema() -> Schema {
    discriminator(
        "status",
        &[
            ("success", open_object(&[])),
            ("failure", open_object(&[("code", string())])),
        ],
    )
    .expect("status schema is well formed")
}

/// `kind` on the outside, `status` nested under branch `b`.
pub fn nested_schema() -> Schema {
    discriminator(
        "kind",
        &[("a", object(&[("c", number())])), ("b", status_schema())],
    )
    .expect("nested schema is well formed")
}

/// Route traces from the crate to the test output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("tagstruct=debug")
        .with_test_writer()
        .try_init();
}
