//! Entry and import item model.
//!
//! An `ImportItem` is the unit of output: one catalog entry plus the aspect
//! bookkeeping the import API requires. Aspect maps are `BTreeMap` so that
//! serialization order is stable across runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Aspect key of the generic, globally-defined schema aspect.
pub const SCHEMA_ASPECT_KEY: &str = "dataplex-types.global.schema";

/// A named, typed metadata payload attached to an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub aspect_type: String,
    pub data: Map<String, Value>,
}

impl Aspect {
    /// Aspect with an empty data payload.
    pub fn empty(aspect_type: impl Into<String>) -> Self {
        Aspect {
            aspect_type: aspect_type.into(),
            data: Map::new(),
        }
    }
}

pub type AspectMap = BTreeMap<String, Aspect>;

/// Aspect map under construction.
///
/// The key list of an import item must always equal the key set of its
/// aspect map. `AspectSet` is the only producer of that pairing: keys are
/// projected from the map on `into_parts`, never tracked separately.
#[derive(Debug, Default)]
pub struct AspectSet {
    map: AspectMap,
}

impl AspectSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, aspect: Aspect) {
        self.map.insert(key.into(), aspect);
    }

    pub fn into_parts(self) -> (AspectMap, Vec<String>) {
        let keys = self.map.keys().cloned().collect();
        (self.map, keys)
    }
}

/// Origin block of an entry: how the source system displays the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntrySource {
    pub display_name: String,
    pub system: String,
}

/// One node of the hierarchical catalog graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub name: String,
    pub entry_type: String,
    pub fully_qualified_name: String,
    /// Resource name of the parent entry; empty for the root.
    pub parent_entry: String,
    pub entry_source: EntrySource,
    pub aspects: AspectMap,
}

/// The external-facing unit: entry plus aspect bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportItem {
    pub entry: Entry,
    pub aspect_keys: Vec<String>,
    pub update_mask: Vec<String>,
}

impl ImportItem {
    pub fn new(entry: Entry, aspect_keys: Vec<String>) -> Self {
        ImportItem {
            entry,
            aspect_keys,
            update_mask: vec!["aspects".to_string()],
        }
    }

    /// Merge one aspect into the item, keeping `aspect_keys` and `aspects`
    /// consistent in a single step.
    pub fn merge_aspect(&mut self, key: &str, aspect: Aspect) {
        self.entry.aspects.insert(key.to_string(), aspect);
        if !self.aspect_keys.iter().any(|k| k == key) {
            self.aspect_keys.push(key.to_string());
        }
    }

    /// True when `aspect_keys` equals the key set of `aspects`.
    pub fn aspect_keys_in_sync(&self) -> bool {
        let mut keys: Vec<&str> = self.aspect_keys.iter().map(String::as_str).collect();
        keys.sort_unstable();
        keys.dedup();
        keys.len() == self.aspect_keys.len()
            && keys.len() == self.entry.aspects.len()
            && keys.iter().all(|k| self.entry.aspects.contains_key(*k))
    }
}
