//! Aspect assembly.
//!
//! Builds the aspect map of one node: the entry-type aspect every node
//! carries, plus the global schema aspect for tables and views. Missing
//! optional source fields default to empty; a missing column name is a
//! contract violation and fails the run.

use serde_json::{json, Map, Value};

use crate::graph::entry::{Aspect, AspectMap, AspectSet, SCHEMA_ASPECT_KEY};
use crate::graph::error::GraphError;
use crate::graph::names::NameBuilder;
use crate::source::types::{ColumnRecord, DatabaseRecord, DatasetRecord};
use crate::system::NodeType;

/// Borrow of the raw record an aspect payload is taken from.
#[derive(Debug, Clone, Copy)]
pub enum NodeRecord<'a> {
    Instance,
    Database(&'a DatabaseRecord),
    Schema,
    Dataset(&'a DatasetRecord),
}

/// Build the full aspect map of a node and the matching key list.
///
/// This is the only producer of the `(aspects, aspect_keys)` pairing; the
/// keys are projected from the map, never computed elsewhere.
pub fn build_aspects(
    names: &NameBuilder,
    node: NodeType,
    record: NodeRecord,
) -> Result<(AspectMap, Vec<String>), GraphError> {
    let mut set = AspectSet::new();

    let entry_aspect_name = names.aspect_name(node);
    let data = match record {
        NodeRecord::Instance | NodeRecord::Schema => Map::new(),
        NodeRecord::Database(db) => database_data(db),
        NodeRecord::Dataset(ds) => dataset_data(ds),
    };
    set.insert(
        entry_aspect_name.clone(),
        Aspect {
            aspect_type: entry_aspect_name,
            data,
        },
    );

    if let NodeRecord::Dataset(ds) = record {
        set.insert(SCHEMA_ASPECT_KEY, schema_aspect(names, ds)?);
    }

    Ok(set.into_parts())
}

fn database_data(db: &DatabaseRecord) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert(
        "description".into(),
        json!(db.description.clone().unwrap_or_default()),
    );
    data.insert(
        "location_uri".into(),
        json!(db.location_uri.clone().unwrap_or_default()),
    );
    data.insert("parameters".into(), json!(db.parameters));
    data
}

fn dataset_data(ds: &DatasetRecord) -> Map<String, Value> {
    let mut data = Map::new();
    data.insert(
        "description".into(),
        json!(ds.description.clone().unwrap_or_default()),
    );
    data.insert(
        "table_type".into(),
        json!(ds.table_type.clone().unwrap_or_default()),
    );
    data.insert(
        "location".into(),
        json!(ds.location.clone().unwrap_or_default()),
    );
    data.insert(
        "input_format".into(),
        json!(ds.input_format.clone().unwrap_or_default()),
    );
    data.insert(
        "output_format".into(),
        json!(ds.output_format.clone().unwrap_or_default()),
    );
    data.insert("parameters".into(), json!(ds.parameters));
    data
}

/// Global schema aspect of a table or view: one ordered field per column.
fn schema_aspect(names: &NameBuilder, ds: &DatasetRecord) -> Result<Aspect, GraphError> {
    let table = ds.name.as_deref().unwrap_or("<unnamed>");
    let fields = ds
        .columns
        .iter()
        .map(|col| schema_field(names, table, col))
        .collect::<Result<Vec<Value>, GraphError>>()?;

    let mut data = Map::new();
    data.insert("fields".into(), Value::Array(fields));
    Ok(Aspect {
        aspect_type: SCHEMA_ASPECT_KEY.to_string(),
        data,
    })
}

fn schema_field(
    names: &NameBuilder,
    table: &str,
    col: &ColumnRecord,
) -> Result<Value, GraphError> {
    let name = col.name.as_deref().ok_or_else(|| GraphError::SourceSchema {
        node: "column",
        at: table.to_string(),
        field: "name",
    })?;

    let metadata_type = names.system().type_table().map(col.native_type.as_deref());
    let mode = match col.nullable {
        Some(false) => "REQUIRED",
        // NULLABLE is assumed when the source does not say otherwise.
        Some(true) | None => "NULLABLE",
    };

    Ok(json!({
        "name": name,
        "dataType": col.native_type.clone().unwrap_or_default(),
        "metadataType": metadata_type.as_str(),
        "mode": mode,
        "description": col.description.clone().unwrap_or_default(),
    }))
}
