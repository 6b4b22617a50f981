//! End-to-end run orchestration.
//!
//! Owns the collaborator handles for exactly one run: fetch the raw tree,
//! build the entry graph, derive and merge lineage, serialize to JSONL and
//! hand the file to the object store. Fatal graph errors abort before
//! anything is serialized; lineage warnings are collected into the summary.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::{Settings, SettingsError};
use crate::graph::{
    DatabaseFilter, GraphBuilder, GraphError, ImportItem, LineageResolver, LineageWarning,
};
use crate::output::{jsonl, ObjectStore};
use crate::source::{MetadataSource, SourceError};

/// Umbrella error for a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Failed to write output file: {0}")]
    Io(#[from] std::io::Error),
}

/// What one run produced.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub entries: usize,
    pub databases: usize,
    pub schemas: usize,
    pub datasets: usize,
    pub lineage_merged: usize,
    pub warnings: Vec<LineageWarning>,
    pub output_file: PathBuf,
}

/// Build the import item sequence for one run, without touching the
/// filesystem. This is the full core path: graph build plus lineage.
pub async fn build_items(
    settings: &Settings,
    source: &dyn MetadataSource,
) -> Result<(Vec<ImportItem>, Vec<LineageWarning>), PipelineError> {
    settings.validate()?;
    let system = settings.source.system()?.descriptor();
    let root = settings.source.root()?;

    let (tree, dependencies) =
        futures::future::try_join(source.fetch_tree(), source.fetch_dependencies()).await?;

    let filter = DatabaseFilter::new(
        settings.source.include_databases.clone(),
        settings.source.exclude_databases.clone(),
    );
    let mut builder = GraphBuilder::new(&settings.target, system, root, filter);
    let items = builder.build(&tree)?;
    info!(entries = items.len(), "entry graph built");

    let mut resolver = LineageResolver::new(&settings.target, system, root);
    let (mut edges, mut warnings) = resolver.edges_from_views(&tree);
    let (dependency_edges, dependency_warnings) =
        resolver.edges_from_dependencies(&dependencies, settings.source.database.as_deref());
    edges.extend(dependency_edges);
    warnings.extend(dependency_warnings);

    let (items, merge_warnings) = resolver.resolve(items, &edges);
    warnings.extend(merge_warnings);
    for warning in &warnings {
        warn!(%warning, "lineage");
    }

    Ok((items, warnings))
}

/// Run the full pipeline: build, serialize, upload.
///
/// `stamp` names the remote folder for this run; it is supplied by the
/// caller so that the core stays free of wall-clock state.
pub async fn run(
    settings: &Settings,
    source: &dyn MetadataSource,
    store: Option<&dyn ObjectStore>,
    output_dir: &Path,
    stamp: &str,
) -> Result<RunSummary, PipelineError> {
    let (items, warnings) = build_items(settings, source).await?;

    let system = settings.source.system()?.descriptor();
    let tag = system.tag();
    let scope = settings
        .source
        .database
        .as_deref()
        .or(settings.source.region.as_deref())
        .unwrap_or("default");
    let filename = format!("{tag}-output-{scope}.jsonl");

    std::fs::create_dir_all(output_dir)?;
    let output_file = output_dir.join(&filename);
    let mut writer = BufWriter::new(File::create(&output_file)?);
    let written = jsonl::write_items(&mut writer, &items)?;
    info!(file = %output_file.display(), entries = written, "import file written");

    if let Some(store) = store {
        let folder = settings.output.folder.as_deref().unwrap_or(tag);
        let remote = format!("{folder}/{stamp}/{filename}");
        store.upload(&output_file, &remote).await?;
    }

    Ok(summarize(items, warnings, output_file))
}

fn summarize(
    items: Vec<ImportItem>,
    warnings: Vec<LineageWarning>,
    output_file: PathBuf,
) -> RunSummary {
    let mut summary = RunSummary {
        entries: items.len(),
        warnings,
        output_file,
        ..Default::default()
    };
    for item in &items {
        // Classify by the entry type id, not the resource name: raw segments
        // may themselves spell "views" or "databases".
        let type_id = item
            .entry
            .entry_type
            .rsplit('/')
            .next()
            .unwrap_or_default();
        if type_id.ends_with("-table") || type_id.ends_with("-view") {
            summary.datasets += 1;
        } else if type_id.ends_with("-schema") {
            summary.schemas += 1;
        } else if type_id.ends_with("-database") {
            summary.databases += 1;
        }
        if item
            .aspect_keys
            .iter()
            .any(|key| key.ends_with(".lineage"))
        {
            summary.lineage_merged += 1;
        }
    }
    summary
}
