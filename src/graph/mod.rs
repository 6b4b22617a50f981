//! The entry graph core: identifier derivation, aspect assembly, graph
//! construction and lineage merging.
//!
//! Everything in this module is deterministic, synchronous in-memory
//! processing. Its bugs are silent-data-corruption bugs, which is why names,
//! aspect bookkeeping and lineage merging carry run-level invariants:
//! sanitization is injective per run, `aspect_keys` always mirrors the
//! aspect map, and parent names are computed by the same codec calls the
//! parent entry used.

pub mod aspect;
pub mod builder;
pub mod entry;
pub mod error;
pub mod lineage;
pub mod names;
pub mod typemap;

pub use builder::{DatabaseFilter, GraphBuilder};
pub use entry::{Aspect, AspectMap, Entry, EntrySource, ImportItem, SCHEMA_ASPECT_KEY};
pub use error::{GraphError, LineageWarning};
pub use lineage::{scan_view_references, LineageEdge, LineageResolver};
pub use names::{Ancestry, NameBuilder, ALLOWED_SYMBOL, FORBIDDEN_SYMBOL};
pub use typemap::{CanonicalType, TypeTable};
