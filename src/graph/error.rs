//! Error types for graph construction.
//!
//! Everything in `GraphError` is fatal: a run that hits one serializes no
//! output at all, because a partially-built catalog is worse than none.
//! Lineage problems are warnings, accumulated into the run summary.

/// Fatal errors raised while building the entry graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Missing required configuration value: {0}")]
    MissingConfig(&'static str),

    /// A raw record lacks a field the builder needs. Dropping the record
    /// instead would silently corrupt downstream schema consumers.
    #[error("{node} record at '{at}' is missing required field '{field}'")]
    SourceSchema {
        node: &'static str,
        at: String,
        field: &'static str,
    },

    /// Two distinct raw identifiers sanitize to the same resource segment.
    /// The target state would be ambiguous, so the run aborts.
    #[error("Name collision: '{first}' and '{second}' both sanitize to '{sanitized}'")]
    NameCollision {
        first: String,
        second: String,
        sanitized: String,
    },

    #[error("Cannot build {node} identifier: missing {missing} ancestor")]
    MissingAncestor {
        node: &'static str,
        missing: &'static str,
    },
}

/// Non-fatal lineage findings. The affected edge is dropped; entry
/// construction is unaffected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineageWarning {
    #[error("lineage target '{0}' matches no built entry; edge dropped")]
    DanglingTarget(String),

    #[error("dependency descriptor has no {side} objects; descriptor skipped")]
    EmptyDependencySide { side: &'static str },

    #[error("dependency object reference is missing a name; reference skipped")]
    UnnamedReference,

    #[error("could not resolve '{reference}' to a fully qualified name; edge dropped")]
    UnresolvableReference { reference: String },
}
