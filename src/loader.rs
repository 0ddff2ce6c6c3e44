use anyhow::Context;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use normalizer::ProjectDocument;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A requested project that could not be included in a batch.
#[derive(Debug, Clone, Serialize)]
pub struct MissingProject {
    pub path: PathBuf,
    pub reason: String,
}

/// The outcome of a batch load. `documents` keeps the order of the requested paths.
#[derive(Debug, Default)]
pub struct LoadedProjects {
    pub documents: Vec<ProjectDocument>,
    pub missing: Vec<MissingProject>,
}

/// Reads and normalizes a single project document.
pub async fn load_project(path: &Path) -> anyhow::Result<ProjectDocument> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read project file {}", path.display()))?;
    let document = normalizer::parse_project(&text)
        .with_context(|| format!("Failed to parse project file {}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        project = %document.name,
        allocations = document.allocations.len(),
        "Loaded project document."
    );
    Ok(document)
}

/// Loads many project documents concurrently, one task per file.
///
/// A file that fails to load is recorded in `missing`; the rest of the batch still loads.
pub async fn load_projects(paths: &[PathBuf]) -> anyhow::Result<LoadedProjects> {
    let progress_bar = ProgressBar::new(paths.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let tasks: Vec<_> = paths
        .iter()
        .cloned()
        .map(|path| {
            let pb_clone = progress_bar.clone();
            tokio::spawn(async move {
                let result = load_project(&path).await;
                pb_clone.inc(1);
                (path, result)
            })
        })
        .collect();

    let results = join_all(tasks).await;
    progress_bar.finish_with_message("Projects loaded.");

    let mut loaded = LoadedProjects::default();
    for (requested, result) in paths.iter().zip(results) {
        match result {
            Ok((_, Ok(document))) => loaded.documents.push(document),
            Ok((path, Err(e))) => loaded.missing.push(MissingProject {
                path,
                reason: format!("{e:#}"),
            }),
            Err(e) => loaded.missing.push(MissingProject {
                path: requested.clone(),
                reason: format!("load task failed: {e}"),
            }),
        }
    }

    Ok(loaded)
}
