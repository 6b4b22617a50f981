//! Source system descriptors.
//!
//! Every supported backend (Oracle, SQL Server, AWS Glue) is described by a
//! `SourceSystem` implementation: a fixed source tag, per-node entry-type
//! identifiers, a native type table, and the shape of its hierarchy. The
//! graph builder runs one fixed algorithm over whichever descriptor it is
//! handed, so adding a backend means adding a descriptor, not a builder.

mod glue;
mod oracle;
mod sqlserver;

pub use glue::AwsGlue;
pub use oracle::Oracle;
pub use sqlserver::SqlServer;

use std::fmt;

use crate::graph::typemap::TypeTable;

/// Node positions in the catalog hierarchy.
///
/// Columns are embedded in Table/View schema aspects and are never
/// standalone nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Instance,
    Database,
    Schema,
    Table,
    View,
}

impl NodeType {
    /// Resource path segment that groups children of this type.
    pub fn path_segment(&self) -> Option<&'static str> {
        match self {
            NodeType::Instance => None,
            NodeType::Database => Some("databases"),
            NodeType::Schema => Some("database_schemas"),
            NodeType::Table => Some("tables"),
            NodeType::View => Some("views"),
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeType::Instance => "instance",
            NodeType::Database => "database",
            NodeType::Schema => "schema",
            NodeType::Table => "table",
            NodeType::View => "view",
        };
        write!(f, "{s}")
    }
}

/// Descriptor for one source backend.
///
/// Implementations are zero-sized; the builder is parameterized over
/// `&dyn SourceSystem`.
pub trait SourceSystem: fmt::Debug + Send + Sync {
    /// Source tag used in FQNs and `entry_source.system`.
    fn tag(&self) -> &'static str;

    /// Short entry-type identifier for a node, e.g. `oracle-table`.
    fn entry_type_id(&self, node: NodeType) -> &'static str;

    /// Native column type lookup table.
    fn type_table(&self) -> &'static TypeTable;

    /// Whether the hierarchy has a schema level between database and
    /// table/view. AWS Glue does not.
    fn has_schema_level(&self) -> bool {
        true
    }

    /// Entry id of the root node, derived from the connection root
    /// (host for databases, region for Glue).
    fn root_entry_id(&self, root: &str) -> String {
        root.to_string()
    }

    /// Display name of the root node.
    fn root_display_name(&self, root: &str) -> String {
        root.to_string()
    }
}

/// Supported source systems, for configuration and CLI parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum System {
    Oracle,
    SqlServer,
    AwsGlue,
}

impl System {
    /// Parse a system tag from configuration.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "oracle" => Some(System::Oracle),
            "sqlserver" | "sql_server" | "mssql" => Some(System::SqlServer),
            "aws_glue" | "glue" => Some(System::AwsGlue),
            _ => None,
        }
    }

    /// The descriptor for this system.
    pub fn descriptor(self) -> &'static dyn SourceSystem {
        match self {
            System::Oracle => &Oracle,
            System::SqlServer => &SqlServer,
            System::AwsGlue => &AwsGlue,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            System::Oracle => "oracle",
            System::SqlServer => "sqlserver",
            System::AwsGlue => "aws_glue",
        }
    }
}
