//! Native-to-canonical column type mapping.
//!
//! Each source system ships its own `TypeTable`; the lookup itself is
//! source-agnostic. Unknown or absent native types map to `Other`, which is
//! lossy but never wrong.

use serde::{Deserialize, Serialize};

/// Canonical metadata types understood by the target catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CanonicalType {
    Number,
    String,
    Boolean,
    Date,
    Datetime,
    Timestamp,
    Bytes,
    Other,
}

impl CanonicalType {
    /// Wire representation, as it appears in schema aspect fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalType::Number => "NUMBER",
            CanonicalType::String => "STRING",
            CanonicalType::Boolean => "BOOLEAN",
            CanonicalType::Date => "DATE",
            CanonicalType::Datetime => "DATETIME",
            CanonicalType::Timestamp => "TIMESTAMP",
            CanonicalType::Bytes => "BYTES",
            CanonicalType::Other => "OTHER",
        }
    }
}

/// Per-dialect lookup table: exact matches first, then prefix rules.
///
/// Matching is case-insensitive. Exact entries win over prefixes so that a
/// table can map `DATE` and `DATETIME2` differently while still catching
/// `TIMESTAMP(6) WITH TIME ZONE` with a `TIMESTAMP` prefix rule.
#[derive(Debug)]
pub struct TypeTable {
    pub exact: &'static [(&'static str, CanonicalType)],
    pub prefix: &'static [(&'static str, CanonicalType)],
}

impl TypeTable {
    /// Map a native type string to its canonical type.
    pub fn map(&self, native: Option<&str>) -> CanonicalType {
        let native = match native {
            Some(s) if !s.trim().is_empty() => s.trim().to_uppercase(),
            _ => return CanonicalType::Other,
        };

        for (candidate, canonical) in self.exact {
            if native == *candidate {
                return *canonical;
            }
        }
        for (candidate, canonical) in self.prefix {
            if native.starts_with(candidate) {
                return *canonical;
            }
        }
        CanonicalType::Other
    }
}
