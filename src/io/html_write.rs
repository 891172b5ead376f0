use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, ToolError};

/// Writes a rendered document, creating missing parent directories.
pub fn write_document(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text)?;
    debug!(path = %path.display(), byte_count = text.len(), "wrote document");
    Ok(())
}

/// Joins the legend and the program into the combined overview document.
pub fn combine(legend: &str, program: &str) -> String {
    let mut combined = String::with_capacity(legend.len() + program.len() + 1);
    combined.push_str(legend);
    combined.push('\n');
    combined.push_str(program);
    combined
}

/// File name of the slide for a track. Ids that are blank, contain a path
/// separator, or contain `..` are rejected so every slide stays a direct child
/// of `slides_dir`.
pub fn slide_path(slides_dir: &Path, track_id: &str) -> Result<PathBuf> {
    let unusable = track_id.trim().is_empty()
        || track_id.contains(['/', '\\'])
        || track_id.contains("..");
    if unusable {
        return Err(ToolError::InvalidTrackId(track_id.to_string()));
    }
    Ok(slides_dir.join(format!("{track_id}.html")))
}
