//! SQL Server source descriptor.

use super::{NodeType, SourceSystem};
use crate::graph::typemap::{CanonicalType, TypeTable};

static TYPES: TypeTable = TypeTable {
    exact: &[
        ("BIGINT", CanonicalType::Number),
        ("INT", CanonicalType::Number),
        ("SMALLINT", CanonicalType::Number),
        ("TINYINT", CanonicalType::Number),
        ("FLOAT", CanonicalType::Number),
        ("REAL", CanonicalType::Number),
        ("MONEY", CanonicalType::Number),
        ("SMALLMONEY", CanonicalType::Number),
        ("TEXT", CanonicalType::String),
        ("NTEXT", CanonicalType::String),
        ("XML", CanonicalType::String),
        ("UNIQUEIDENTIFIER", CanonicalType::String),
        ("BIT", CanonicalType::Boolean),
        ("DATE", CanonicalType::Date),
        ("SMALLDATETIME", CanonicalType::Datetime),
        ("DATETIME", CanonicalType::Datetime),
        ("DATETIME2", CanonicalType::Datetime),
        ("DATETIMEOFFSET", CanonicalType::Timestamp),
        ("TIMESTAMP", CanonicalType::Timestamp),
        ("IMAGE", CanonicalType::Bytes),
    ],
    prefix: &[
        ("DECIMAL", CanonicalType::Number),
        ("NUMERIC", CanonicalType::Number),
        ("NVARCHAR", CanonicalType::String),
        ("NCHAR", CanonicalType::String),
        ("VARCHAR", CanonicalType::String),
        ("CHAR", CanonicalType::String),
        ("VARBINARY", CanonicalType::Bytes),
        ("BINARY", CanonicalType::Bytes),
    ],
};

/// Microsoft SQL Server source.
#[derive(Debug, Clone, Copy)]
pub struct SqlServer;

impl SourceSystem for SqlServer {
    fn tag(&self) -> &'static str {
        "sqlserver"
    }

    fn entry_type_id(&self, node: NodeType) -> &'static str {
        match node {
            NodeType::Instance => "sqlserver-instance",
            NodeType::Database => "sqlserver-database",
            NodeType::Schema => "sqlserver-schema",
            NodeType::Table => "sqlserver-table",
            NodeType::View => "sqlserver-view",
        }
    }

    fn type_table(&self) -> &'static TypeTable {
        &TYPES
    }
}
