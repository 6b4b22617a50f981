//! AWS Glue Data Catalog source descriptor.
//!
//! Glue has no schema level: tables hang directly off databases, and the
//! root node is the regional catalog rather than a host.

use super::{NodeType, SourceSystem};
use crate::graph::typemap::{CanonicalType, TypeTable};

static TYPES: TypeTable = TypeTable {
    exact: &[
        ("BIGINT", CanonicalType::Number),
        ("INT", CanonicalType::Number),
        ("SMALLINT", CanonicalType::Number),
        ("TINYINT", CanonicalType::Number),
        ("DOUBLE", CanonicalType::Number),
        ("FLOAT", CanonicalType::Number),
        ("STRING", CanonicalType::String),
        ("BOOLEAN", CanonicalType::Boolean),
        ("DATE", CanonicalType::Date),
        ("TIMESTAMP", CanonicalType::Timestamp),
        ("BINARY", CanonicalType::Bytes),
    ],
    prefix: &[
        ("DECIMAL", CanonicalType::Number),
        ("VARCHAR", CanonicalType::String),
        ("CHAR", CanonicalType::String),
    ],
};

/// AWS Glue Data Catalog source.
#[derive(Debug, Clone, Copy)]
pub struct AwsGlue;

impl SourceSystem for AwsGlue {
    fn tag(&self) -> &'static str {
        "aws_glue"
    }

    fn entry_type_id(&self, node: NodeType) -> &'static str {
        match node {
            NodeType::Instance => "aws-glue-catalog",
            NodeType::Database => "aws-glue-database",
            // Glue exposes views as tables; the ids collapse accordingly.
            NodeType::Schema | NodeType::Table | NodeType::View => "aws-glue-table",
        }
    }

    fn type_table(&self) -> &'static TypeTable {
        &TYPES
    }

    fn has_schema_level(&self) -> bool {
        false
    }

    fn root_entry_id(&self, root: &str) -> String {
        format!("aws-glue-catalog-{root}")
    }

    fn root_display_name(&self, _root: &str) -> String {
        "AWS Glue Data Catalog".to_string()
    }
}
