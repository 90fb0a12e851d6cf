//! Auxiliary error renderers: flat (form/field split), tree
//! (shape-mirroring), and a human-readable multi-line form. The kernel
//! itself neither formats nor localizes beyond message resolution.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{PathSegment, ZodicError};

/// Flat error structure, useful for form validation: top-level messages
/// plus messages grouped by first path key.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FlatError {
    pub form_errors: Vec<String>,
    pub field_errors: HashMap<String, Vec<String>>,
}

/// Flatten an error by its issues' first path segment.
pub fn flatten_error(error: &ZodicError) -> FlatError {
    let mut flat = FlatError::default();
    for issue in error.issues() {
        match issue.path.first() {
            None => flat.form_errors.push(issue.message.clone()),
            Some(segment) => {
                let key = match segment {
                    PathSegment::Key(name) => name.clone(),
                    PathSegment::Index(idx) => idx.to_string(),
                };
                flat.field_errors
                    .entry(key)
                    .or_default()
                    .push(issue.message.clone());
            }
        }
    }
    flat
}

/// Tree-shaped error structure mirroring the schema shape.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ErrorTree {
    pub errors: Vec<String>,
    pub properties: HashMap<String, ErrorTree>,
    pub items: Vec<Option<ErrorTree>>,
}

impl ErrorTree {
    fn descend(&mut self, segment: &PathSegment) -> &mut ErrorTree {
        match segment {
            PathSegment::Key(name) => self.properties.entry(name.clone()).or_default(),
            PathSegment::Index(idx) => {
                while self.items.len() <= *idx {
                    self.items.push(None);
                }
                self.items[*idx].get_or_insert_with(ErrorTree::default)
            }
        }
    }
}

/// Convert an error into a tree keyed by issue paths.
pub fn treeify_error(error: &ZodicError) -> ErrorTree {
    let mut root = ErrorTree::default();
    for issue in error.issues() {
        let mut node = &mut root;
        for segment in &issue.path {
            node = node.descend(segment);
        }
        node.errors.push(issue.message.clone());
    }
    root
}

/// Render an error as one bullet line per issue, paths appended.
pub fn prettify_error(error: &ZodicError) -> String {
    let mut out = String::new();
    for issue in error.issues() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("✖ ");
        out.push_str(&issue.message);
        if !issue.path.is_empty() {
            let path: String = issue.path.iter().map(PathSegment::to_string).collect();
            out.push_str(&format!(" → at {}", path.trim_start_matches('.')));
        }
    }
    out
}
