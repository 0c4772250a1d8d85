//! Scene export entry point
//!
//! Validates configuration, bakes and assembles the document, then writes
//! it in one piece.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::document::{assemble, Assembled, ExportDocument};
use crate::scene::Scene;
use crate::settings::ExportSettings;
use crate::util::{ExportWarning, Result};

/// Outcome of a successful export
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub objects: usize,
    pub animated: usize,
    pub warnings: Vec<ExportWarning>,
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Exported {} objects ({} animated) to {}",
            self.objects,
            self.animated,
            self.path.display()
        )?;
        if !self.warnings.is_empty() {
            write!(f, " with {} warning(s)", self.warnings.len())?;
        }
        Ok(())
    }
}

/// Export `scene` to the file named by `settings`.
///
/// Every configuration error is reported before the frame sweep starts.
/// The file is only touched once the whole document has been built.
pub fn export_scene<S: Scene + ?Sized>(scene: &mut S, settings: &ExportSettings) -> Result<ExportSummary> {
    let path = settings.resolve_output_path(scene.name(), scene.storage_dir())?;
    info!("Exporting '{}' to {}", scene.name(), path.display());

    let Assembled { document, warnings } = assemble(scene, settings)?;
    write_document(&path, &document)?;

    let summary = ExportSummary {
        path,
        objects: document.objects.len(),
        animated: document.animated_count(),
        warnings,
    };
    info!("{summary}");
    Ok(summary)
}

/// Write a document, replacing `path` atomically.
pub fn write_document(path: &Path, document: &ExportDocument) -> Result<()> {
    let json = document.to_json()?;
    write_atomic(path, json.as_bytes())?;
    debug!("wrote {} bytes to {}", json.len(), path.display());
    Ok(())
}

/// Write through a sibling temp file so a failed write never leaves a
/// truncated document behind.
fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{file_name}.tmp"));

    let result = fs::write(&tmp, bytes).and_then(|()| fs::rename(&tmp, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}
