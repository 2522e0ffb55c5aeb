use std::path::PathBuf;

use thiserror::Error;

/// Why a sheet (or the optional resources file) did not make it into a snapshot.
///
/// These are diagnostics, not aborts: the loader records one per failing
/// sheet and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("sheet '{sheet}' unavailable: {reason}")]
    SourceUnavailable { sheet: String, reason: String },

    #[error("sheet '{sheet}' has no header row")]
    MissingHeader { sheet: String },

    #[error("unsupported file format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },
}

impl LoadError {
    pub fn unavailable(sheet: &str, reason: impl std::fmt::Display) -> Self {
        LoadError::SourceUnavailable {
            sheet: sheet.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Sheet (or file) name this diagnostic is keyed to.
    pub fn sheet(&self) -> String {
        match self {
            LoadError::SourceUnavailable { sheet, .. } | LoadError::MissingHeader { sheet } => {
                sheet.clone()
            }
            LoadError::UnsupportedFormat { path } => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }
}
