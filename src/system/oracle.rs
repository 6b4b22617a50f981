//! Oracle source descriptor.
//!
//! Oracle schemas are usernames; cluster users carry a `C##` prefix that the
//! name codec sanitizes. `DATE` carries a time component in Oracle, so it
//! maps to DATETIME rather than DATE.

use super::{NodeType, SourceSystem};
use crate::graph::typemap::{CanonicalType, TypeTable};

static TYPES: TypeTable = TypeTable {
    exact: &[
        ("INTEGER", CanonicalType::Number),
        ("SHORTINTEGER", CanonicalType::Number),
        ("LONGINTEGER", CanonicalType::Number),
        ("BINARY_FLOAT", CanonicalType::Number),
        ("BINARY_DOUBLE", CanonicalType::Number),
        ("FLOAT", CanonicalType::Number),
        ("INT", CanonicalType::Number),
        ("DECIMAL", CanonicalType::Number),
        ("NUMERIC", CanonicalType::Number),
        ("NVARCHAR2", CanonicalType::String),
        ("CHAR", CanonicalType::String),
        ("NCHAR", CanonicalType::String),
        ("CLOB", CanonicalType::String),
        ("NCLOB", CanonicalType::String),
        ("STRING", CanonicalType::String),
        ("LONG", CanonicalType::Bytes),
        ("BLOB", CanonicalType::Bytes),
        ("RAW", CanonicalType::Bytes),
        ("LONG RAW", CanonicalType::Bytes),
        ("BFILE", CanonicalType::Bytes),
        ("DATE", CanonicalType::Datetime),
    ],
    prefix: &[
        ("NUMBER", CanonicalType::Number),
        ("VARCHAR", CanonicalType::String),
        ("TIMESTAMP", CanonicalType::Timestamp),
    ],
};

/// Oracle database source.
#[derive(Debug, Clone, Copy)]
pub struct Oracle;

impl SourceSystem for Oracle {
    fn tag(&self) -> &'static str {
        "oracle"
    }

    fn entry_type_id(&self, node: NodeType) -> &'static str {
        match node {
            NodeType::Instance => "oracle-instance",
            NodeType::Database => "oracle-database",
            NodeType::Schema => "oracle-schema",
            NodeType::Table => "oracle-table",
            NodeType::View => "oracle-view",
        }
    }

    fn type_table(&self) -> &'static TypeTable {
        &TYPES
    }
}
