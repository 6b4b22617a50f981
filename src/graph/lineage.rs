//! Lineage derivation and merging.
//!
//! Edges come from two places: a conservative scan of view definition text
//! for FROM/JOIN references, and explicit job dependency descriptors. Both
//! are best-effort; a reference that cannot be resolved drops the edge with
//! a warning and never fails the run. Entry construction is not best-effort,
//! which is why this pass runs only after the full graph is materialized.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::config::TargetConfig;
use crate::graph::entry::{Aspect, ImportItem};
use crate::graph::error::LineageWarning;
use crate::graph::names::{Ancestry, NameBuilder};
use crate::source::types::{DatasetKind, DependencyRecord, ObjectRef, SourceTree};
use crate::system::{NodeType, SourceSystem};

/// One directed lineage edge between source-namespace names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineageEdge {
    pub source_fqn: String,
    pub target_fqn: String,
}

/// Word-boundary match of FROM/JOIN targets. Identifiers may be qualified
/// up to `db.schema.table`. Subqueries start with `(` and never match, so
/// false positives stay rare; missed references are acceptable.
static VIEW_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:from|join)\s+([A-Za-z_][\w$#]*(?:\.[A-Za-z_][\w$#]*){0,2})")
        .expect("view reference pattern is valid")
});

/// Extract referenced object names from view definition text.
///
/// Heuristic by design; swap for a real SQL parser behind this signature
/// if the false-negative rate ever matters.
pub fn scan_view_references(view_text: &str) -> BTreeSet<String> {
    VIEW_REF_RE
        .captures_iter(view_text)
        .map(|cap| cap[1].to_string())
        .collect()
}

/// Derives edges and merges lineage aspects onto built import items.
pub struct LineageResolver<'a> {
    names: NameBuilder<'a>,
    system: &'a dyn SourceSystem,
}

impl<'a> LineageResolver<'a> {
    pub fn new(target: &'a TargetConfig, system: &'a dyn SourceSystem, root: &str) -> Self {
        LineageResolver {
            names: NameBuilder::new(target, system, root),
            system,
        }
    }

    /// Derive edges from the view definition texts in the tree.
    ///
    /// Unqualified references resolve into the view's own schema (or
    /// database, for systems without a schema level).
    pub fn edges_from_views(
        &mut self,
        tree: &SourceTree,
    ) -> (Vec<LineageEdge>, Vec<LineageWarning>) {
        let mut edges = Vec::new();
        let mut warnings = Vec::new();

        for db_node in &tree.databases {
            let Some(db) = db_node.record.name.as_deref() else {
                continue;
            };
            let mut scopes: Vec<(Option<&str>, &Vec<_>)> =
                vec![(None, &db_node.datasets)];
            for schema_node in &db_node.schemas {
                if let Some(schema) = schema_node.record.name.as_deref() {
                    scopes.push((Some(schema), &schema_node.datasets));
                }
            }

            for (schema, datasets) in scopes {
                for dataset in datasets {
                    if dataset.kind != DatasetKind::View {
                        continue;
                    }
                    let (Some(view), Some(text)) =
                        (dataset.name.as_deref(), dataset.view_text.as_deref())
                    else {
                        continue;
                    };
                    let anc = Ancestry::dataset(db, schema, view);
                    let Ok(target_fqn) = self.names.fqn(NodeType::View, &anc) else {
                        continue;
                    };

                    let references = scan_view_references(text);
                    if references.is_empty() {
                        debug!(view, "no references derived from view text");
                        continue;
                    }
                    for reference in references {
                        match self.reference_fqn(&reference, db, schema) {
                            Some(source_fqn) if source_fqn != target_fqn => {
                                edges.push(LineageEdge {
                                    source_fqn,
                                    target_fqn: target_fqn.clone(),
                                });
                            }
                            Some(_) => {} // self reference
                            None => warnings.push(LineageWarning::UnresolvableReference {
                                reference: reference.clone(),
                            }),
                        }
                    }
                }
            }
        }
        (edges, warnings)
    }

    /// Resolve a scanned `[db.][schema.]name` reference into an FQN,
    /// defaulting missing qualifiers to the view's own scope.
    fn reference_fqn(&mut self, reference: &str, db: &str, schema: Option<&str>) -> Option<String> {
        let parts: Vec<&str> = reference.split('.').collect();
        let anc = match (parts.as_slice(), self.system.has_schema_level()) {
            ([name], true) => Ancestry::dataset(db, schema, name),
            ([qualifier, name], true) => Ancestry::dataset(db, Some(qualifier), name),
            ([db_part, qualifier, name], true) => {
                Ancestry::dataset(db_part, Some(qualifier), name)
            }
            ([name], false) => Ancestry::dataset(db, None, name),
            ([db_part, name], false) => Ancestry::dataset(db_part, None, name),
            _ => return None,
        };
        // Referenced objects are assumed to be tables; a view reference
        // still produces the same FQN chain.
        self.names.fqn(NodeType::Table, &anc).ok()
    }

    /// Derive edges from explicit dependency descriptors: the cross product
    /// of each descriptor's sources and targets.
    pub fn edges_from_dependencies(
        &mut self,
        dependencies: &[DependencyRecord],
        default_database: Option<&str>,
    ) -> (Vec<LineageEdge>, Vec<LineageWarning>) {
        let mut edges = Vec::new();
        let mut warnings = Vec::new();

        for dependency in dependencies {
            if dependency.sources.is_empty() {
                warnings.push(LineageWarning::EmptyDependencySide { side: "source" });
                continue;
            }
            if dependency.targets.is_empty() {
                warnings.push(LineageWarning::EmptyDependencySide { side: "target" });
                continue;
            }

            let sources = self.object_fqns(&dependency.sources, default_database, &mut warnings);
            let targets = self.object_fqns(&dependency.targets, default_database, &mut warnings);

            for target in &targets {
                for source in &sources {
                    if source != target {
                        edges.push(LineageEdge {
                            source_fqn: source.clone(),
                            target_fqn: target.clone(),
                        });
                    }
                }
            }
        }
        (edges, warnings)
    }

    fn object_fqns(
        &mut self,
        refs: &[ObjectRef],
        default_database: Option<&str>,
        warnings: &mut Vec<LineageWarning>,
    ) -> Vec<String> {
        let mut fqns = Vec::new();
        for obj in refs {
            let Some(name) = obj.name.as_deref() else {
                warnings.push(LineageWarning::UnnamedReference);
                continue;
            };
            let Some(db) = obj.database.as_deref().or(default_database) else {
                warnings.push(LineageWarning::UnresolvableReference {
                    reference: name.to_string(),
                });
                continue;
            };
            let node = match obj.kind {
                DatasetKind::Table => NodeType::Table,
                DatasetKind::View => NodeType::View,
            };
            let anc = Ancestry::dataset(db, obj.schema.as_deref(), name);
            match self.names.fqn(node, &anc) {
                Ok(fqn) => fqns.push(fqn),
                Err(_) => warnings.push(LineageWarning::UnresolvableReference {
                    reference: name.to_string(),
                }),
            }
        }
        fqns
    }

    /// Merge lineage aspects onto the items whose FQN matches an edge
    /// target. Items without edges pass through unchanged; edges whose
    /// target matches no item are dropped with a warning.
    ///
    /// Duplicate `(source, target)` pairs collapse, and re-merging an edge
    /// set already present is a no-op, so the pass is idempotent.
    pub fn resolve(
        &self,
        mut items: Vec<ImportItem>,
        edges: &[LineageEdge],
    ) -> (Vec<ImportItem>, Vec<LineageWarning>) {
        let mut warnings = Vec::new();

        let mut grouped: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        for edge in edges {
            grouped
                .entry(edge.target_fqn.as_str())
                .or_default()
                .insert(edge.source_fqn.as_str());
        }

        let known: HashSet<&str> = items
            .iter()
            .map(|item| item.entry.fully_qualified_name.as_str())
            .collect();
        for target in grouped.keys() {
            if !known.contains(target) {
                warnings.push(LineageWarning::DanglingTarget(target.to_string()));
            }
        }

        let aspect_key = self.names.lineage_aspect_name();
        for item in &mut items {
            let Some(sources) = grouped.get(item.entry.fully_qualified_name.as_str()) else {
                continue;
            };
            let aspect = lineage_aspect(
                &aspect_key,
                item,
                sources.iter().map(|s| s.to_string()),
            );
            item.merge_aspect(&aspect_key, aspect);
        }

        (items, warnings)
    }
}

/// Build the lineage aspect for one item, unioning any links already
/// present so repeated merges cannot duplicate them.
fn lineage_aspect(
    aspect_key: &str,
    item: &ImportItem,
    sources: impl Iterator<Item = String>,
) -> Aspect {
    let target_fqn = item.entry.fully_qualified_name.clone();

    let mut all_sources: BTreeSet<String> = sources.collect();
    if let Some(existing) = item.entry.aspects.get(aspect_key) {
        if let Some(links) = existing.data.get("links").and_then(Value::as_array) {
            for link in links {
                if let Some(fqn) = link
                    .get("source")
                    .and_then(|s| s.get("fully_qualified_name"))
                    .and_then(Value::as_str)
                {
                    all_sources.insert(fqn.to_string());
                }
            }
        }
    }

    let links: Vec<Value> = all_sources
        .into_iter()
        .map(|source| {
            json!({
                "source": { "fully_qualified_name": source },
                "target": { "fully_qualified_name": target_fqn },
            })
        })
        .collect();

    let mut data = Map::new();
    data.insert("links".into(), Value::Array(links));
    Aspect {
        aspect_type: aspect_key.to_string(),
        data,
    }
}
