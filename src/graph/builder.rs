//! Entry graph construction.
//!
//! Walks the raw source tree top-down (instance, databases, schemas,
//! tables/views) in listing order and emits one import item per node.
//! Traversal order carries no catalog semantics but is stable, so two runs
//! over identical input produce identical output.

use tracing::debug;

use crate::config::TargetConfig;
use crate::graph::aspect::{build_aspects, NodeRecord};
use crate::graph::entry::{Entry, EntrySource, ImportItem};
use crate::graph::error::GraphError;
use crate::graph::names::{Ancestry, NameBuilder};
use crate::source::types::{DatasetKind, DatasetRecord, SourceTree};
use crate::system::{NodeType, SourceSystem};

/// Database inclusion filter, applied to raw (pre-sanitization) names
/// before a node is built. Case-sensitive exact match.
#[derive(Debug, Clone, Default)]
pub struct DatabaseFilter {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl DatabaseFilter {
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        DatabaseFilter { include, exclude }
    }

    /// A non-empty include list is restrictive; the exclude list wins
    /// regardless of the include outcome.
    pub fn admits(&self, raw: &str) -> bool {
        if !self.include.is_empty() && !self.include.iter().any(|n| n == raw) {
            return false;
        }
        !self.exclude.iter().any(|n| n == raw)
    }
}

/// Builds the full sequence of import items for one run.
pub struct GraphBuilder<'a> {
    system: &'a dyn SourceSystem,
    names: NameBuilder<'a>,
    root: String,
    filter: DatabaseFilter,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(
        target: &'a TargetConfig,
        system: &'a dyn SourceSystem,
        root: &str,
        filter: DatabaseFilter,
    ) -> Self {
        GraphBuilder {
            system,
            names: NameBuilder::new(target, system, root),
            root: root.to_string(),
            filter,
        }
    }

    /// Build every node of the tree, root first, children in listing order.
    ///
    /// Excluded databases contribute no node and none of their descendants
    /// are visited. Any missing required field aborts the whole run.
    pub fn build(&mut self, tree: &SourceTree) -> Result<Vec<ImportItem>, GraphError> {
        let mut items = Vec::new();

        let display = tree
            .catalog
            .display_name
            .clone()
            .unwrap_or_else(|| self.system.root_display_name(&self.root));
        items.push(self.make_item(
            NodeType::Instance,
            &Ancestry::default(),
            display,
            NodeRecord::Instance,
        )?);

        for db_node in &tree.databases {
            let db_name =
                db_node
                    .record
                    .name
                    .as_deref()
                    .ok_or_else(|| GraphError::SourceSchema {
                        node: "database",
                        at: self.root.clone(),
                        field: "name",
                    })?;

            if !self.filter.admits(db_name) {
                debug!(database = db_name, "database excluded by filter");
                continue;
            }

            items.push(self.make_item(
                NodeType::Database,
                &Ancestry::database(db_name),
                db_name.to_string(),
                NodeRecord::Database(&db_node.record),
            )?);

            for schema_node in &db_node.schemas {
                let schema_name =
                    schema_node
                        .record
                        .name
                        .as_deref()
                        .ok_or_else(|| GraphError::SourceSchema {
                            node: "schema",
                            at: db_name.to_string(),
                            field: "name",
                        })?;

                items.push(self.make_item(
                    NodeType::Schema,
                    &Ancestry::schema(db_name, schema_name),
                    schema_name.to_string(),
                    NodeRecord::Schema,
                )?);

                for dataset in &schema_node.datasets {
                    items.push(self.build_dataset(db_name, Some(schema_name), dataset)?);
                }
            }

            for dataset in &db_node.datasets {
                items.push(self.build_dataset(db_name, None, dataset)?);
            }
        }

        Ok(items)
    }

    fn build_dataset(
        &mut self,
        database: &str,
        schema: Option<&str>,
        dataset: &DatasetRecord,
    ) -> Result<ImportItem, GraphError> {
        let name = dataset
            .name
            .as_deref()
            .ok_or_else(|| GraphError::SourceSchema {
                node: "dataset",
                at: schema.unwrap_or(database).to_string(),
                field: "name",
            })?;

        let node = match dataset.kind {
            DatasetKind::Table => NodeType::Table,
            DatasetKind::View => NodeType::View,
        };
        self.make_item(
            node,
            &Ancestry::dataset(database, schema, name),
            name.to_string(),
            NodeRecord::Dataset(dataset),
        )
    }

    fn make_item(
        &mut self,
        node: NodeType,
        anc: &Ancestry,
        display_name: String,
        record: NodeRecord,
    ) -> Result<ImportItem, GraphError> {
        let name = self.names.entry_name(node, anc)?;
        let fully_qualified_name = self.names.fqn(node, anc)?;
        let parent_entry = self.names.parent_name(node, anc)?;
        let (aspects, aspect_keys) = build_aspects(&self.names, node, record)?;

        let entry = Entry {
            name,
            entry_type: self.names.entry_type(node),
            fully_qualified_name,
            parent_entry,
            entry_source: EntrySource {
                display_name,
                system: self.system.tag().to_string(),
            },
            aspects,
        };
        Ok(ImportItem::new(entry, aspect_keys))
    }
}
