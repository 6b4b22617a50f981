//! Hierarchical identifier construction.
//!
//! Two naming planes exist for every node:
//!
//! - the resource **name**, a path under the target entry group
//!   (`projects/.../entryGroups/.../entries/...`), and
//! - the **FQN**, a colon/dot form scoped to the source system's own
//!   namespace (`oracle:`host`.db.schema.table`), used as the lineage join
//!   key.
//!
//! Both are derived from the same raw ancestry strings through the same
//! sanitization, so a raw name and its identifiers stay mutually derivable.
//! Sanitization is checked for injectivity per run: two distinct raw strings
//! collapsing onto the same full resource name (or FQN) abort the build.
//! Matching sanitized segments under different parents are fine, because the
//! resulting names still differ.

use std::collections::HashMap;

use crate::config::TargetConfig;
use crate::graph::error::GraphError;
use crate::system::{NodeType, SourceSystem};

/// Symbol the target catalog rejects in resource path segments.
pub const FORBIDDEN_SYMBOL: char = '#';
/// Stand-in for the forbidden symbol.
pub const ALLOWED_SYMBOL: char = '!';

/// Raw ancestry chain of a node, pre-sanitization.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ancestry<'a> {
    pub database: Option<&'a str>,
    pub schema: Option<&'a str>,
    pub dataset: Option<&'a str>,
}

impl<'a> Ancestry<'a> {
    pub fn database(db: &'a str) -> Self {
        Ancestry {
            database: Some(db),
            ..Default::default()
        }
    }

    pub fn schema(db: &'a str, schema: &'a str) -> Self {
        Ancestry {
            database: Some(db),
            schema: Some(schema),
            ..Default::default()
        }
    }

    pub fn dataset(db: &'a str, schema: Option<&'a str>, dataset: &'a str) -> Self {
        Ancestry {
            database: Some(db),
            schema,
            dataset: Some(dataset),
        }
    }

    fn require(
        &self,
        node: NodeType,
        field: Option<&'a str>,
        missing: &'static str,
    ) -> Result<&'a str, GraphError> {
        field.ok_or(GraphError::MissingAncestor {
            node: node_label(node),
            missing,
        })
    }
}

fn node_label(node: NodeType) -> &'static str {
    match node {
        NodeType::Instance => "instance",
        NodeType::Database => "database",
        NodeType::Schema => "schema",
        NodeType::Table => "table",
        NodeType::View => "view",
    }
}

/// Per-run identifier builder.
///
/// Deterministic: the same configuration and ancestry always produce the
/// same strings. The only state is the injectivity registries, one per
/// naming plane, keyed by the full sanitized name.
pub struct NameBuilder<'a> {
    target: &'a TargetConfig,
    system: &'a dyn SourceSystem,
    /// Raw root segment: host for databases, region for catalog services.
    root: String,
    path_segments: HashMap<String, String>,
    fqn_segments: HashMap<String, String>,
}

impl<'a> NameBuilder<'a> {
    pub fn new(target: &'a TargetConfig, system: &'a dyn SourceSystem, root: &str) -> Self {
        NameBuilder {
            target,
            system,
            root: root.to_string(),
            path_segments: HashMap::new(),
            fqn_segments: HashMap::new(),
        }
    }

    pub fn system(&self) -> &dyn SourceSystem {
        self.system
    }

    /// Entries prefix of the target entry group.
    fn entries_prefix(&self) -> String {
        format!(
            "projects/{}/locations/{}/entryGroups/{}/entries",
            self.target.project, self.target.location, self.target.entry_group
        )
    }

    /// Full resource name of a node.
    pub fn entry_name(&mut self, node: NodeType, anc: &Ancestry) -> Result<String, GraphError> {
        match node {
            NodeType::Instance => {
                let root_id = self.system.root_entry_id(&self.root);
                let prefix = self.entries_prefix();
                let segment = self.path_segment(&prefix, &root_id)?;
                Ok(format!("{prefix}/{segment}"))
            }
            NodeType::Database => {
                let db = anc.require(node, anc.database, "database")?;
                let parent = self.entry_name(NodeType::Instance, anc)?;
                self.child_name(&parent, node, db)
            }
            NodeType::Schema => {
                let schema = anc.require(node, anc.schema, "schema")?;
                let parent = self.entry_name(NodeType::Database, anc)?;
                self.child_name(&parent, node, schema)
            }
            NodeType::Table | NodeType::View => {
                let dataset = anc.require(node, anc.dataset, "dataset")?;
                let parent = if self.system.has_schema_level() {
                    self.entry_name(NodeType::Schema, anc)?
                } else {
                    self.entry_name(NodeType::Database, anc)?
                };
                self.child_name(&parent, node, dataset)
            }
        }
    }

    /// Join a child onto its parent name under the node type's grouping
    /// segment. The root has no grouping segment and never reaches here.
    fn child_name(&mut self, parent: &str, node: NodeType, raw: &str) -> Result<String, GraphError> {
        match node.path_segment() {
            Some(group) => {
                let scope = format!("{parent}/{group}");
                let segment = self.path_segment(&scope, raw)?;
                Ok(format!("{scope}/{segment}"))
            }
            None => Ok(parent.to_string()),
        }
    }

    /// Resource name of the node one level up; empty for the root.
    pub fn parent_name(&mut self, node: NodeType, anc: &Ancestry) -> Result<String, GraphError> {
        match node {
            NodeType::Instance => Ok(String::new()),
            NodeType::Database => self.entry_name(NodeType::Instance, anc),
            NodeType::Schema => self.entry_name(NodeType::Database, anc),
            NodeType::Table | NodeType::View => {
                if self.system.has_schema_level() {
                    self.entry_name(NodeType::Schema, anc)
                } else {
                    self.entry_name(NodeType::Database, anc)
                }
            }
        }
    }

    /// Source-namespace fully qualified name of a node.
    ///
    /// One uniform chain for all systems: `tag:`root`.db[.schema][.dataset]`.
    pub fn fqn(&mut self, node: NodeType, anc: &Ancestry) -> Result<String, GraphError> {
        match node {
            NodeType::Instance => {
                let raw_root = self.root.clone();
                let tag = self.system.tag();
                let root = self.fqn_segment(tag, &raw_root)?;
                Ok(format!("{tag}:`{root}`"))
            }
            NodeType::Database => {
                let db = anc.require(node, anc.database, "database")?;
                let parent = self.fqn(NodeType::Instance, anc)?;
                let segment = self.fqn_segment(&parent, db)?;
                Ok(format!("{parent}.{segment}"))
            }
            NodeType::Schema => {
                let schema = anc.require(node, anc.schema, "schema")?;
                let parent = self.fqn(NodeType::Database, anc)?;
                let segment = self.fqn_segment(&parent, schema)?;
                Ok(format!("{parent}.{segment}"))
            }
            NodeType::Table | NodeType::View => {
                let dataset = anc.require(node, anc.dataset, "dataset")?;
                let parent = if self.system.has_schema_level() {
                    self.fqn(NodeType::Schema, anc)?
                } else {
                    self.fqn(NodeType::Database, anc)?
                };
                let segment = self.fqn_segment(&parent, dataset)?;
                Ok(format!("{parent}.{segment}"))
            }
        }
    }

    /// Full entry type resource name of a node.
    pub fn entry_type(&self, node: NodeType) -> String {
        format!(
            "projects/{}/locations/{}/entryTypes/{}",
            self.target.project,
            self.target.location,
            self.system.entry_type_id(node)
        )
    }

    /// Dot-joined aspect key for a node's entry-type aspect.
    pub fn aspect_name(&self, node: NodeType) -> String {
        format!(
            "{}.{}.{}",
            self.target.project,
            self.target.location,
            self.system.entry_type_id(node)
        )
    }

    /// Dot-joined aspect key of the lineage aspect.
    pub fn lineage_aspect_name(&self) -> String {
        format!(
            "{}.{}.lineage",
            self.target.project, self.target.location
        )
    }

    /// Sanitize a raw string into a resource path segment and record the
    /// substitution for injectivity checking within its position.
    fn path_segment(&mut self, scope: &str, raw: &str) -> Result<String, GraphError> {
        // ':' is legal in FQNs (the root is backtick-quoted) but not in
        // resource path segments.
        let sanitized = raw
            .replace(FORBIDDEN_SYMBOL, &ALLOWED_SYMBOL.to_string())
            .replace(':', "@");
        register(&mut self.path_segments, scope, raw, sanitized)
    }

    /// Sanitize a raw string into an FQN segment and record the
    /// substitution for injectivity checking within its position.
    fn fqn_segment(&mut self, scope: &str, raw: &str) -> Result<String, GraphError> {
        let sanitized = raw.replace(FORBIDDEN_SYMBOL, &ALLOWED_SYMBOL.to_string());
        register(&mut self.fqn_segments, scope, raw, sanitized)
    }
}

/// Keyed by `scope` plus the sanitized segment, so only two distinct raws
/// that produce the same full name collide. The same sanitized segment
/// under different parents is legal.
fn register(
    registry: &mut HashMap<String, String>,
    scope: &str,
    raw: &str,
    sanitized: String,
) -> Result<String, GraphError> {
    let key = format!("{scope}/{sanitized}");
    match registry.get(&key) {
        Some(previous) if previous != raw => Err(GraphError::NameCollision {
            first: previous.clone(),
            second: raw.to_string(),
            sanitized,
        }),
        Some(_) => Ok(sanitized),
        None => {
            registry.insert(key, raw.to_string());
            Ok(sanitized)
        }
    }
}
