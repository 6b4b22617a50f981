//! MetadataSource trait definition.
//!
//! The trait abstracts over how raw structural metadata is listed: a
//! relational catalog queried over the network, a cloud catalog service, or
//! an in-memory fixture. All I/O happens behind this boundary, before the
//! graph builder runs; failures are always surfaced, never swallowed.

use async_trait::async_trait;

use super::types::{
    CatalogRecord, DatabaseNode, DatabaseRecord, DatasetRecord, DependencyRecord, SchemaNode,
    SchemaRecord, SourceTree,
};
use super::SourceError;

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Trait for listing raw metadata from a source system.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// The single root record (instance or catalog).
    async fn fetch_catalog(&self) -> SourceResult<CatalogRecord>;

    /// Databases in listing order, unfiltered (the builder filters).
    async fn fetch_databases(&self) -> SourceResult<Vec<DatabaseRecord>>;

    /// Schemas of one database; empty on systems without a schema level.
    async fn fetch_schemas(&self, database: &str) -> SourceResult<Vec<SchemaRecord>>;

    /// Tables and views, with embedded column descriptors. `schema` is
    /// `None` on systems without a schema level.
    async fn fetch_datasets(
        &self,
        database: &str,
        schema: Option<&str>,
    ) -> SourceResult<Vec<DatasetRecord>>;

    /// Explicit job/ETL dependency descriptors; empty when the source has
    /// none.
    async fn fetch_dependencies(&self) -> SourceResult<Vec<DependencyRecord>> {
        Ok(Vec::new())
    }

    /// Assemble the full raw tree for one run.
    ///
    /// Default implementation lists level by level. Databases whose name is
    /// absent are carried through; the builder decides that they are fatal.
    async fn fetch_tree(&self) -> SourceResult<SourceTree> {
        let catalog = self.fetch_catalog().await?;
        let mut databases = Vec::new();

        for record in self.fetch_databases().await? {
            let Some(db_name) = record.name.clone() else {
                databases.push(DatabaseNode {
                    record,
                    ..Default::default()
                });
                continue;
            };

            let schema_records = self.fetch_schemas(&db_name).await?;
            let mut schemas = Vec::new();
            let mut datasets = Vec::new();

            if schema_records.is_empty() {
                datasets = self.fetch_datasets(&db_name, None).await?;
            } else {
                for schema_record in schema_records {
                    let schema_datasets = match schema_record.name.as_deref() {
                        Some(schema) => self.fetch_datasets(&db_name, Some(schema)).await?,
                        None => Vec::new(),
                    };
                    schemas.push(SchemaNode {
                        record: schema_record,
                        datasets: schema_datasets,
                    });
                }
            }

            databases.push(DatabaseNode {
                record,
                schemas,
                datasets,
            });
        }

        Ok(SourceTree { catalog, databases })
    }
}

/// In-memory source over a pre-assembled tree. Backs tests and file-based
/// runs.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub tree: SourceTree,
    pub dependencies: Vec<DependencyRecord>,
}

impl StaticSource {
    pub fn new(tree: SourceTree) -> Self {
        StaticSource {
            tree,
            dependencies: Vec::new(),
        }
    }

    pub fn with_dependencies(mut self, dependencies: Vec<DependencyRecord>) -> Self {
        self.dependencies = dependencies;
        self
    }
}

#[async_trait]
impl MetadataSource for StaticSource {
    async fn fetch_catalog(&self) -> SourceResult<CatalogRecord> {
        Ok(self.tree.catalog.clone())
    }

    async fn fetch_databases(&self) -> SourceResult<Vec<DatabaseRecord>> {
        Ok(self
            .tree
            .databases
            .iter()
            .map(|node| node.record.clone())
            .collect())
    }

    async fn fetch_schemas(&self, database: &str) -> SourceResult<Vec<SchemaRecord>> {
        Ok(self
            .database(database)?
            .schemas
            .iter()
            .map(|node| node.record.clone())
            .collect())
    }

    async fn fetch_datasets(
        &self,
        database: &str,
        schema: Option<&str>,
    ) -> SourceResult<Vec<DatasetRecord>> {
        let node = self.database(database)?;
        match schema {
            None => Ok(node.datasets.clone()),
            Some(schema) => Ok(node
                .schemas
                .iter()
                .find(|s| s.record.name.as_deref() == Some(schema))
                .map(|s| s.datasets.clone())
                .unwrap_or_default()),
        }
    }

    async fn fetch_dependencies(&self) -> SourceResult<Vec<DependencyRecord>> {
        Ok(self.dependencies.clone())
    }

    /// The tree is already assembled; no per-level listing needed.
    async fn fetch_tree(&self) -> SourceResult<SourceTree> {
        Ok(self.tree.clone())
    }
}

impl StaticSource {
    fn database(&self, name: &str) -> SourceResult<&DatabaseNode> {
        self.tree
            .databases
            .iter()
            .find(|node| node.record.name.as_deref() == Some(name))
            .ok_or_else(|| SourceError::Query(format!("unknown database '{name}'")))
    }
}
