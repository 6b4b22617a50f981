//! # Mica
//!
//! Builds vendor-neutral metadata import graphs from external data sources.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │            Source collaborators (async I/O)             │
//! │   (catalog service, relational catalog, fixture file)   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [source]
//! ┌─────────────────────────────────────────────────────────┐
//! │                SourceTree (raw records)                  │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [graph::builder]
//! ┌─────────────────────────────────────────────────────────┐
//! │      ImportItems (names, FQNs, aspects, bookkeeping)     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [graph::lineage]
//! ┌─────────────────────────────────────────────────────────┐
//! │          ImportItems + merged lineage aspects            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [output]
//! ┌─────────────────────────────────────────────────────────┐
//! │            JSONL import file → object store              │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The graph core is deterministic, synchronous in-memory processing; all
//! network I/O lives behind the collaborator traits in [`source`] and
//! [`output`].

pub mod config;
pub mod graph;
pub mod output;
pub mod pipeline;
pub mod source;
pub mod system;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::{Settings, TargetConfig};
    pub use crate::graph::{
        Ancestry, DatabaseFilter, GraphBuilder, GraphError, ImportItem, LineageEdge,
        LineageResolver, LineageWarning, NameBuilder,
    };
    pub use crate::source::{MetadataSource, StaticSource};
    pub use crate::system::{NodeType, SourceSystem, System};
}
