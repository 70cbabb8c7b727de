// ── Report exports ──
//
// CSV of the rows currently shown, PDF of the full collection. Both
// produce an in-memory artifact; writing it out is the caller's job.

mod csv;
mod pdf;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::error::CoreError;
use crate::model::Resource;

pub use self::csv::render_csv;
pub use self::pdf::TableReport;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        self.into()
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Pdf => "application/pdf",
        }
    }
}

/// A rendered report, ready to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    /// `{resource}-report.{ext}`
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Write the artifact into `dir`, returning the full path.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, CoreError> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes).map_err(|e| CoreError::Export {
            message: format!("cannot write {}: {e}", path.display()),
        })?;
        Ok(path)
    }
}

/// CSV of `rows`, using the visible columns.
pub fn export_csv<R: Resource>(rows: &[Arc<R>]) -> Result<ExportArtifact, CoreError> {
    Ok(ExportArtifact {
        format: ExportFormat::Csv,
        file_name: R::KIND.report_file_name(ExportFormat::Csv.extension()),
        bytes: render_csv(rows)?,
    })
}

/// Titled, dated PDF table of `rows`.
pub fn export_pdf<R: Resource>(
    rows: &[Arc<R>],
    generated_on: NaiveDate,
) -> Result<ExportArtifact, CoreError> {
    Ok(ExportArtifact {
        format: ExportFormat::Pdf,
        file_name: R::KIND.report_file_name(ExportFormat::Pdf.extension()),
        bytes: TableReport::for_resources(rows, generated_on).render()?,
    })
}
