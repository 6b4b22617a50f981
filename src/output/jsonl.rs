//! JSONL serialization of import items.
//!
//! One JSON object per line; field names follow the import API exactly
//! (`entry`, `aspect_keys`, `update_mask`, and within the entry `name`,
//! `entry_type`, `fully_qualified_name`, `parent_entry`, `entry_source`,
//! `aspects`).

use std::io::Write;

use crate::graph::ImportItem;

/// Serialize one import item to a single JSON line (no trailing newline).
pub fn to_line(item: &ImportItem) -> serde_json::Result<String> {
    serde_json::to_string(item)
}

/// Write items as JSONL; returns the number of lines written.
pub fn write_items<W: Write>(writer: &mut W, items: &[ImportItem]) -> std::io::Result<usize> {
    for item in items {
        let line = to_line(item).map_err(std::io::Error::other)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    Ok(items.len())
}
