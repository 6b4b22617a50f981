//! Raw record types returned by source collaborators.
//!
//! These are untransformed source attributes; the graph builder decides
//! what is required and what defaults to empty. Optional identifying fields
//! are `Option<String>` precisely so the builder can reject missing ones
//! instead of silently dropping the record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root record of a source: the instance or catalog itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogRecord {
    /// Display name override; the system descriptor supplies a default.
    pub display_name: Option<String>,
}

/// A database (or Glue database) record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseRecord {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location_uri: Option<String>,
    pub parameters: BTreeMap<String, String>,
}

/// A database schema record (absent on systems without a schema level).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaRecord {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Whether a dataset holds rows or is a stored query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetKind {
    Table,
    View,
}

impl Default for DatasetKind {
    fn default() -> Self {
        DatasetKind::Table
    }
}

/// A table or view record, with embedded column descriptors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetRecord {
    pub name: Option<String>,
    pub kind: DatasetKind,
    pub description: Option<String>,
    /// Physical type tag from the source, e.g. `EXTERNAL_TABLE`.
    pub table_type: Option<String>,
    pub location: Option<String>,
    pub input_format: Option<String>,
    pub output_format: Option<String>,
    pub parameters: BTreeMap<String, String>,
    /// Original view definition text, when the source exposes it.
    pub view_text: Option<String>,
    pub columns: Vec<ColumnRecord>,
}

/// One column descriptor, embedded in a dataset record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnRecord {
    pub name: Option<String>,
    pub native_type: Option<String>,
    /// `None` when the source does not record nullability.
    pub nullable: Option<bool>,
    pub description: Option<String>,
}

/// The full raw tree for one run, as listed by the collaborators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceTree {
    pub catalog: CatalogRecord,
    pub databases: Vec<DatabaseNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseNode {
    pub record: DatabaseRecord,
    /// Populated on schema-bearing systems; empty for Glue-style sources.
    pub schemas: Vec<SchemaNode>,
    /// Datasets directly under the database (Glue-style sources).
    pub datasets: Vec<DatasetRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaNode {
    pub record: SchemaRecord,
    pub datasets: Vec<DatasetRecord>,
}

/// Reference to one source object inside a dependency descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectRef {
    pub database: Option<String>,
    pub schema: Option<String>,
    pub name: Option<String>,
    pub kind: DatasetKind,
}

/// An explicit job/ETL dependency descriptor: every (source, target) pair
/// becomes one lineage edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencyRecord {
    pub sources: Vec<ObjectRef>,
    pub targets: Vec<ObjectRef>,
}
