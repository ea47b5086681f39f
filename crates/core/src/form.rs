//! Nested form state: one mutable draft plus its parallel error tree.
//!
//! A [`FormModel`] resolves field names into a typed path and knows how to
//! store a coerced value at that path. [`FormState`] owns the draft and keeps
//! the error tree in step with edits: a successful write clears the error at
//! exactly that location, and every edit clears the general message.

use std::fmt;

use crate::error_tree::{ErrorLocation, ErrorTree};
use crate::fields::{FieldInput, FieldValue, InputKind};

/// A typed location inside a form model.
pub trait FieldPath: Copy + Eq + fmt::Debug {
    /// Where errors for this path are rendered.
    fn location(self) -> ErrorLocation;
}

/// A record that can be edited through [`FormState`].
pub trait FormModel {
    type Path: FieldPath;

    /// Resolve a top-level field name.
    fn resolve_field(name: &str) -> Option<Self::Path>;

    /// Resolve a sub-field of a nested group. Models without groups resolve
    /// nothing.
    fn resolve_group_field(_group: &str, _sub_field: &str) -> Option<Self::Path> {
        None
    }

    /// The control kind a renderer should use for this path.
    fn input_kind(path: Self::Path) -> InputKind;

    /// Store a coerced value. Writing into a nested group creates the group
    /// first if it is absent and replaces only the targeted sub-field.
    fn write(&mut self, path: Self::Path, value: FieldValue);

    /// Required-field rules. Pure: never mutates the draft.
    fn validate(&self) -> ErrorTree;

    /// Resolve an edit's addressing. A group without a sub-field resolves
    /// nothing.
    fn resolve(name: &str, group: Option<&str>, sub_field: Option<&str>) -> Option<Self::Path> {
        match (group, sub_field) {
            (None, _) => Self::resolve_field(name),
            (Some(group), Some(sub_field)) => Self::resolve_group_field(group, sub_field),
            (Some(_), None) => None,
        }
    }

    /// Resolve a dotted key (`inventory`, `author.BirthDate`).
    fn resolve_key(key: &str) -> Option<Self::Path> {
        match key.split_once('.') {
            Some((group, sub_field)) => Self::resolve_group_field(group, sub_field),
            None => Self::resolve_field(key),
        }
    }
}

/// The in-memory draft of one record and its error tree.
#[derive(Debug, Clone)]
pub struct FormState<M: FormModel> {
    draft: M,
    errors: ErrorTree,
    locked: Vec<M::Path>,
}

impl<M: FormModel> FormState<M> {
    pub fn new(draft: M) -> Self {
        Self {
            draft,
            errors: ErrorTree::new(),
            locked: Vec::new(),
        }
    }

    pub fn draft(&self) -> &M {
        &self.draft
    }

    pub fn errors(&self) -> &ErrorTree {
        &self.errors
    }

    /// Replace the draft (e.g. after a fetch) and drop all errors.
    pub fn reset(&mut self, draft: M) {
        self.draft = draft;
        self.errors = ErrorTree::new();
    }

    /// Make a path read-only; later edits to it are no-ops.
    pub fn lock(&mut self, path: M::Path) {
        if !self.locked.contains(&path) {
            self.locked.push(path);
        }
    }

    pub fn is_locked(&self, path: M::Path) -> bool {
        self.locked.contains(&path)
    }

    /// Apply one renderer edit.
    ///
    /// Unknown names, groups without a sub-field, and locked paths are
    /// silently ignored. Returns whether the draft was written.
    pub fn edit(&mut self, input: &FieldInput<'_>) -> bool {
        self.errors.clear_general();
        match M::resolve(input.name, input.group, input.sub_field) {
            Some(path) => self.write(path, input.coerced()),
            None => false,
        }
    }

    /// Apply an already-coerced value at a typed path.
    pub fn set(&mut self, path: M::Path, value: FieldValue) -> bool {
        self.errors.clear_general();
        self.write(path, value)
    }

    fn write(&mut self, path: M::Path, value: FieldValue) -> bool {
        if self.is_locked(path) {
            return false;
        }
        self.draft.write(path, value);
        self.errors.remove(path.location());
        true
    }

    /// Run the model's rules, replacing the error tree. Returns `true` when
    /// the draft is valid.
    pub fn validate(&mut self) -> bool {
        self.errors = self.draft.validate();
        self.errors.is_empty()
    }

    /// Replace the whole error tree (e.g. with a conversion failure).
    pub fn set_errors(&mut self, errors: ErrorTree) {
        self.errors = errors;
    }

    pub fn set_error(&mut self, location: ErrorLocation, message: impl Into<String>) {
        self.errors.insert(location, message);
    }

    pub fn set_general_error(&mut self, message: impl Into<String>) {
        self.errors.set_general(message);
    }
}
