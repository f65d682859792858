pub mod profile_pipeline;
pub mod scene_pipeline;

use crate::core::{DiagramSet, Storage};
use crate::utils::error::Result;

/// Writes every figure as an HTML page and returns where each one landed.
///
/// All pages are serialized before the first write so a rendering failure
/// leaves nothing behind.
pub(crate) fn write_figures<S: Storage>(storage: &S, diagrams: DiagramSet) -> Result<Vec<String>> {
    let pages = diagrams
        .figures
        .iter()
        .map(|named| -> Result<(String, String)> {
            Ok((named.file_name.clone(), named.figure.to_html()?))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut locations = Vec::with_capacity(pages.len());
    for (file_name, html) in pages {
        tracing::debug!("Writing {} ({} bytes)", file_name, html.len());
        storage.write_file(&file_name, html.as_bytes())?;
        locations.push(storage.location(&file_name));
    }

    Ok(locations)
}
