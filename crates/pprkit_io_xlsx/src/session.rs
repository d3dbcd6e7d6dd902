//! Session controller owning the row store.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::exporter::{build_export_payload, export_records};
use crate::normalize::normalize_rows;
use crate::reader::{read_rows_from_bytes, read_rows_from_path};
use crate::spec::{
    EnumRawCell, EnumSessionCommand, EnumStatusLevel, PprError, SpecExportOptions,
    SpecExportPayload, SpecExportReport, SpecPprRecord, SpecSessionOptions, SpecSessionOutcome,
    SpecStatusMessage, SpecStoreSnapshot,
};
use crate::store::RowStore;

/// One user session: load, prune, export.
///
/// All mutation goes through `&mut self`, so a second load cannot start
/// while a previous one is still running; it runs afterwards and replaces
/// the store. A failed load keeps the previous content.
#[derive(Debug, Clone, Default)]
pub struct PprSession {
    store: RowStore,
    options: SpecSessionOptions,
}

impl PprSession {
    /// Create an empty session.
    pub fn new(options: SpecSessionOptions) -> Self {
        Self {
            store: RowStore::new(),
            options,
        }
    }

    /// Session options.
    pub fn options(&self) -> &SpecSessionOptions {
        &self.options
    }

    /// Current records.
    pub fn records(&self) -> &[SpecPprRecord] {
        self.store.records()
    }

    /// Whether clear/export/delete actions have anything to act on.
    pub fn has_data(&self) -> bool {
        self.store.has_data()
    }

    /// Full state for re-rendering.
    pub fn snapshot(&self) -> SpecStoreSnapshot {
        self.store.snapshot()
    }

    /// Load the first sheet of the file at `path`, replacing the store.
    pub fn load_path<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, PprError> {
        let rows = read_rows_from_path(path.as_ref())?;
        Ok(self.load_rows(&rows))
    }

    /// Load an in-memory spreadsheet payload, replacing the store.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<usize, PprError> {
        let rows = read_rows_from_bytes(bytes)?;
        Ok(self.load_rows(&rows))
    }

    /// Normalize already-decoded rows into the store.
    pub fn load_rows(&mut self, rows: &[Vec<EnumRawCell>]) -> usize {
        self.store.replace_all(normalize_rows(rows));
        info!(n_records = self.store.len(), "loaded records");
        self.store.len()
    }

    /// Delete one record by 0-based position.
    pub fn delete_at(&mut self, position: usize) -> Result<SpecPprRecord, PprError> {
        self.store.delete_at(position)
    }

    /// Delete several records by 0-based positions.
    pub fn delete_many(&mut self, positions: &[usize]) -> Result<usize, PprError> {
        self.store.delete_many(positions)
    }

    /// Reset the store.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Payload the host would save, without touching the filesystem.
    pub fn payload(&self) -> Result<SpecExportPayload, PprError> {
        build_export_payload(self.store.records())
    }

    /// Export into the configured output directory.
    pub fn export(&self) -> Result<SpecExportReport, PprError> {
        export_records(self.store.records(), &self.options.export)
    }

    /// Export into `dir_output`, keeping the configured overwrite rule.
    pub fn export_to<P: AsRef<Path>>(&self, dir_output: P) -> Result<SpecExportReport, PprError> {
        let options = SpecExportOptions {
            dir_output: dir_output.as_ref().to_path_buf(),
            ..self.options.export.clone()
        };
        export_records(self.store.records(), &options)
    }

    /// Run one presentation command and describe the result.
    ///
    /// Failures never escape: they become a warning/danger status and the
    /// store is left as it was.
    pub fn handle(&mut self, command: EnumSessionCommand) -> SpecSessionOutcome {
        let mut path_file_out: Option<PathBuf> = None;

        let status = match command {
            EnumSessionCommand::LoadPath(path) => derive_load_status(self.load_path(path)),
            EnumSessionCommand::LoadBytes(bytes) => derive_load_status(self.load_bytes(&bytes)),
            EnumSessionCommand::DeleteAt(position) => match self.delete_at(position) {
                Ok(_) => SpecStatusMessage::new(EnumStatusLevel::Success, "Row deleted"),
                Err(e) => derive_error_status(&e),
            },
            EnumSessionCommand::DeleteMany(positions) => match self.delete_many(&positions) {
                Ok(n_removed) => SpecStatusMessage::new(
                    EnumStatusLevel::Success,
                    format!("Deleted {n_removed} row(s)"),
                ),
                Err(e) => derive_error_status(&e),
            },
            EnumSessionCommand::Clear => {
                self.clear();
                SpecStatusMessage::new(EnumStatusLevel::Info, "All data cleared")
            }
            EnumSessionCommand::Export => {
                derive_export_status(self.export(), &mut path_file_out)
            }
            EnumSessionCommand::ExportTo(dir_output) => {
                derive_export_status(self.export_to(dir_output), &mut path_file_out)
            }
        };

        if matches!(
            status.level,
            EnumStatusLevel::Warning | EnumStatusLevel::Danger
        ) {
            warn!(level = status.level.as_str(), text = %status.text, "command failed");
        }

        SpecSessionOutcome {
            status,
            snapshot: self.snapshot(),
            path_file_out,
        }
    }
}

fn derive_load_status(result: Result<usize, PprError>) -> SpecStatusMessage {
    match result {
        Ok(_) => SpecStatusMessage::new(EnumStatusLevel::Success, "File processed successfully"),
        Err(e) => SpecStatusMessage::new(
            EnumStatusLevel::Danger,
            format!("Error processing file: {e}"),
        ),
    }
}

fn derive_export_status(
    result: Result<SpecExportReport, PprError>,
    path_file_out: &mut Option<PathBuf>,
) -> SpecStatusMessage {
    match result {
        Ok(report) => {
            *path_file_out = Some(report.path_file_out);
            SpecStatusMessage::new(EnumStatusLevel::Success, "PPR file downloaded successfully")
        }
        Err(PprError::NoDataToExport) => {
            SpecStatusMessage::new(EnumStatusLevel::Warning, "No data to download")
        }
        Err(e) => SpecStatusMessage::new(
            EnumStatusLevel::Danger,
            format!("Error exporting file: {e}"),
        ),
    }
}

fn derive_error_status(e: &PprError) -> SpecStatusMessage {
    match e {
        PprError::IndexOutOfRange { position, .. } => SpecStatusMessage::new(
            EnumStatusLevel::Warning,
            format!("Row {} does not exist", position + 1),
        ),
        PprError::NoSelection => SpecStatusMessage::new(EnumStatusLevel::Warning, "No rows selected"),
        _ => SpecStatusMessage::new(EnumStatusLevel::Danger, e.to_string()),
    }
}
