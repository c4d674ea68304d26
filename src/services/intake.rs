use std::path::Path;

use bytes::Bytes;

use crate::error::Result;
use crate::models::SelectedFile;

/// Reads a file from disk into a [`SelectedFile`], typing it from its content.
pub async fn read_selected_file(path: &Path) -> Result<SelectedFile> {
    let data = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());

    Ok(SelectedFile::new(name, None, Bytes::from(data)))
}

/// Reads a whole selection. Unreadable paths are logged and skipped, matching
/// how a picker only ever hands over files it could open.
pub async fn read_selection<P: AsRef<Path>>(paths: &[P]) -> Vec<SelectedFile> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        match read_selected_file(path).await {
            Ok(file) => files.push(file),
            Err(e) => tracing::warn!("Skipping {}: {}", path.display(), e),
        }
    }
    files
}
