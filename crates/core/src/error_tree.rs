//! Nested error tree mirroring a draft's group structure.
//!
//! Top-level fields map to a message; groups map to a sub-tree of
//! sub-field messages. A group entry exists only while at least one of its
//! sub-fields has an error. The reserved `general` key carries a non-field
//! message (transport failures, missing context).

use std::collections::BTreeMap;

use serde::Serialize;

/// Key of the non-field error entry.
pub const GENERAL_KEY: &str = "general";

/// Where an error is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorLocation {
    /// A top-level field.
    Field(&'static str),
    /// A sub-field of a nested group.
    GroupField {
        group: &'static str,
        field: &'static str,
    },
}

impl ErrorLocation {
    /// Dotted path, e.g. `author.BirthDate`.
    pub fn path(&self) -> String {
        match self {
            ErrorLocation::Field(field) => (*field).to_string(),
            ErrorLocation::GroupField { group, field } => format!("{group}.{field}"),
        }
    }
}

/// One entry of the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorNode {
    Message(String),
    Group(BTreeMap<&'static str, String>),
}

/// Validation and submission errors for one form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorTree {
    entries: BTreeMap<&'static str, ErrorNode>,
}

impl ErrorTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty tree means "valid".
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of top-level entries (a group with several errors counts once).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Record an error, merging with sibling errors of the same group.
    pub fn insert(&mut self, location: ErrorLocation, message: impl Into<String>) {
        let message = message.into();
        match location {
            ErrorLocation::Field(field) => {
                self.entries.insert(field, ErrorNode::Message(message));
            }
            ErrorLocation::GroupField { group, field } => {
                let node = self
                    .entries
                    .entry(group)
                    .or_insert_with(|| ErrorNode::Group(BTreeMap::new()));
                if let ErrorNode::Message(_) = node {
                    *node = ErrorNode::Group(BTreeMap::new());
                }
                if let ErrorNode::Group(fields) = node {
                    fields.insert(field, message);
                }
            }
        }
    }

    /// Message at a location, if any.
    pub fn get(&self, location: ErrorLocation) -> Option<&str> {
        match location {
            ErrorLocation::Field(field) => match self.entries.get(field) {
                Some(ErrorNode::Message(m)) => Some(m.as_str()),
                _ => None,
            },
            ErrorLocation::GroupField { group, field } => match self.entries.get(group) {
                Some(ErrorNode::Group(fields)) => fields.get(field).map(String::as_str),
                _ => None,
            },
        }
    }

    /// Remove the error at exactly this location. A group whose last entry
    /// is removed disappears.
    pub fn remove(&mut self, location: ErrorLocation) -> Option<String> {
        match location {
            ErrorLocation::Field(field) => {
                if !matches!(self.entries.get(field), Some(ErrorNode::Message(_))) {
                    return None;
                }
                match self.entries.remove(field) {
                    Some(ErrorNode::Message(m)) => Some(m),
                    _ => None,
                }
            }
            ErrorLocation::GroupField { group, field } => {
                let Some(ErrorNode::Group(fields)) = self.entries.get_mut(group) else {
                    return None;
                };
                let removed = fields.remove(field);
                if fields.is_empty() {
                    self.entries.remove(group);
                }
                removed
            }
        }
    }

    /// Set the non-field message.
    pub fn set_general(&mut self, message: impl Into<String>) {
        self.insert(ErrorLocation::Field(GENERAL_KEY), message);
    }

    pub fn general(&self) -> Option<&str> {
        self.get(ErrorLocation::Field(GENERAL_KEY))
    }

    pub fn clear_general(&mut self) {
        self.remove(ErrorLocation::Field(GENERAL_KEY));
    }

    /// Every error as `(dotted path, message)`, in key order.
    pub fn messages(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        for (key, node) in &self.entries {
            match node {
                ErrorNode::Message(m) => out.push(((*key).to_string(), m.as_str())),
                ErrorNode::Group(fields) => {
                    for (field, m) in fields {
                        out.push((format!("{key}.{field}"), m.as_str()));
                    }
                }
            }
        }
        out
    }
}
