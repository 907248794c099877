//! Subcommand handlers

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::json;
use tracing::info;

use subtitler_core::{PostFilters, ProviderContext, ProvidersManager, Subtitle};

fn search_output(subtitles: &[Subtitle]) -> serde_json::Value {
    json!({
        "total": subtitles.len(),
        "data": subtitles,
    })
}

/// Run an aggregate or single-provider search and print the results as JSON.
pub async fn search(
    manager: &ProvidersManager,
    ctx: &ProviderContext,
    provider: Option<&str>,
    term: &str,
    filters: &PostFilters,
) -> Result<()> {
    let subtitles = manager.search(ctx, provider, term, filters).await;
    println!("{}", serde_json::to_string_pretty(&search_output(&subtitles))?);
    Ok(())
}

/// Destination inside `dir` for a provider-supplied filename.
///
/// Only the final path component is kept so a filename cannot escape `dir`.
fn output_path(dir: &Path, filename: &str) -> Option<PathBuf> {
    Path::new(filename).file_name().map(|name| dir.join(name))
}

/// Stream one subtitle file from a provider into `dir`.
pub async fn download(
    manager: &ProvidersManager,
    ctx: &ProviderContext,
    provider: &str,
    id: &str,
    dir: &Path,
) -> Result<()> {
    let download = manager
        .download(ctx, provider, id)
        .await
        .with_context(|| format!("Failed to download {id} from {provider}"))?;

    let path = output_path(dir, &download.filename)
        .with_context(|| format!("Invalid filename from provider: {:?}", download.filename))?;

    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    let mut file = tokio::fs::File::create(&path)
        .await
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let content_type = download.content_type.clone();
    let written = download.write_to(&mut file).await?;

    info!(path = %path.display(), bytes = written, content_type = %content_type, "Subtitle saved");
    println!("{}", path.display());
    Ok(())
}

/// Print every configured provider and whether it is enabled.
pub fn providers(manager: &ProvidersManager) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&manager.providers())?);
    Ok(())
}
