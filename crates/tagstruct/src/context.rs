//! Traversal context for a single validation run.
//!
//! The context tracks where the engine currently is inside the value being
//! validated: the path of keys from the root, and the chain of ancestor
//! values (the "branch"). A fresh context is created per run; nothing here is
//! shared between runs.

use serde_json::Value;
use std::fmt;

/// One step in a path from the root value to a nested value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object property.
    Key(String),
    /// An array element.
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{}", key),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Context handed to schema validators and entry enumerators.
///
/// `branch` always holds one more element than `path`: the root value sits at
/// the bottom and every pushed segment adds the value found under it. Absent
/// values (a declared field missing from its object) are stored as `None`.
#[derive(Debug, Clone)]
pub struct Context<'v> {
    path: Vec<PathSegment>,
    branch: Vec<Option<&'v Value>>,
    mask: bool,
}

impl<'v> Context<'v> {
    /// Create a context rooted at `root`.
    pub fn new(root: &'v Value) -> Self {
        Self {
            path: Vec::new(),
            branch: vec![Some(root)],
            mask: false,
        }
    }

    /// Enable or disable mask mode, where strict shapes ignore unknown keys.
    pub fn with_mask(mut self, mask: bool) -> Self {
        self.mask = mask;
        self
    }

    /// The current path joined with dots, e.g. `items.0.name`.
    pub fn current_path(&self) -> String {
        self.path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    pub fn branch(&self) -> &[Option<&'v Value>] {
        &self.branch
    }

    pub fn is_masked(&self) -> bool {
        self.mask
    }

    /// Descend into `value` under `segment`.
    pub fn push(&mut self, segment: PathSegment, value: Option<&'v Value>) {
        self.path.push(segment);
        self.branch.push(value);
    }

    /// Return to the parent value.
    pub fn pop(&mut self) {
        self.path.pop();
        self.branch.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_path() {
        let root = json!({ "items": [{ "name": "a" }] });
        let mut ctx = Context::new(&root);
        ctx.push("items".into(), root.get("items"));
        ctx.push(PathSegment::Index(0), root["items"].get(0));
        ctx.push("name".into(), root["items"][0].get("name"));

        assert_eq!(ctx.current_path(), "items.0.name");
        assert_eq!(ctx.branch().len(), 4);
        assert_eq!(ctx.branch()[3], Some(&json!("a")));
    }

    #[test]
    fn test_context_pop_restores_parent() {
        let root = json!({ "a": 1 });
        let mut ctx = Context::new(&root);
        ctx.push("a".into(), root.get("a"));
        ctx.push("missing".into(), None);
        ctx.pop();

        assert_eq!(ctx.path(), &[PathSegment::Key("a".into())]);
        assert_eq!(ctx.branch().last(), Some(&Some(&json!(1))));
    }

    #[test]
    fn test_mask_flag() {
        let root = json!(null);
        assert!(!Context::new(&root).is_masked());
        assert!(Context::new(&root).with_mask(true).is_masked());
    }
}
