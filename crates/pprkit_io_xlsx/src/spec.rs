//! Shared PPR specification models and the crate error type.

use std::fmt;
use std::path::PathBuf;

use crate::conf::{C_RECORD_RESULT, C_RECORD_STATUS};

////////////////////////////////////////////////////////////////////////////////
// #region RawCellSpecification

/// Raw cell value as decoded from the first worksheet.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumRawCell {
    /// Missing/blank cell.
    None,
    /// Text cell.
    String(String),
    /// Numeric cell (integers included).
    Number(f64),
    /// Boolean cell.
    Boolean(bool),
    /// Date/time cell, already rendered to ISO text.
    DateTime(String),
    /// Excel error cell (`#DIV/0!`, `#N/A`, ...).
    Error(String),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RecordSpecification

/// One normalized export record.
///
/// `line_number` follows the record's position in its [`crate::RowStore`] and
/// is only ever written by renumbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecPprRecord {
    reference: String,
    line_number: String,
    isbn: String,
}

impl SpecPprRecord {
    pub(crate) fn new(reference: String, isbn: String) -> Self {
        Self {
            reference,
            line_number: String::new(),
            isbn,
        }
    }

    pub(crate) fn set_line_number(&mut self, line_number: String) {
        self.line_number = line_number;
    }

    /// Order reference (raw column A).
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Zero-padded 1-based position.
    pub fn line_number(&self) -> &str {
        &self.line_number
    }

    /// ISBN (raw column C).
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    /// Fixed business tag.
    pub fn status(&self) -> &'static str {
        C_RECORD_STATUS
    }

    /// Fixed result tag.
    pub fn result(&self) -> &'static str {
        C_RECORD_RESULT
    }

    /// Fields in export order: reference, line number, isbn, status, result.
    pub fn fields(&self) -> [&str; 5] {
        [
            &self.reference,
            &self.line_number,
            &self.isbn,
            C_RECORD_STATUS,
            C_RECORD_RESULT,
        ]
    }
}

/// Store state handed to the presentation layer after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecStoreSnapshot {
    /// Full ordered record sequence.
    pub records: Vec<SpecPprRecord>,
    /// Whether dependent actions (clear/export/delete) should be enabled.
    pub has_data: bool,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ExportSpecification

/// Export destination options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecExportOptions {
    /// Directory the export file is written into.
    pub dir_output: PathBuf,
    /// Replace an existing file with the same name.
    pub if_overwrite: bool,
}

impl Default for SpecExportOptions {
    fn default() -> Self {
        Self {
            dir_output: PathBuf::from("."),
            if_overwrite: true,
        }
    }
}

/// Serialized export, ready to be saved by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecExportPayload {
    /// `T1.M<reference>.PPR`.
    pub file_name: String,
    /// Newline-joined record lines.
    pub content: String,
    /// MIME type for hosts that download instead of writing.
    pub mime_type: &'static str,
}

/// Result of one successful export write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecExportReport {
    /// Written file path.
    pub path_file_out: PathBuf,
    /// Number of exported records.
    pub cnt_records: usize,
    /// Number of bytes written.
    pub cnt_bytes: usize,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SessionSpecification

/// Session-wide options.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecSessionOptions {
    /// Options used by [`crate::PprSession::export`].
    pub export: SpecExportOptions,
}

/// Severity of a transient status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumStatusLevel {
    /// Operation completed.
    Success,
    /// Neutral notice.
    Info,
    /// Nothing happened; user action needed.
    Warning,
    /// Operation failed.
    Danger,
}

impl EnumStatusLevel {
    /// Lowercase level name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

/// Transient, dismissible message for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecStatusMessage {
    /// Message severity.
    pub level: EnumStatusLevel,
    /// User-facing text.
    pub text: String,
}

impl SpecStatusMessage {
    pub(crate) fn new(level: EnumStatusLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

impl fmt::Display for SpecStatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.level.as_str(), self.text)
    }
}

/// Commands accepted from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumSessionCommand {
    /// A file was selected on disk.
    LoadPath(PathBuf),
    /// A file payload was handed over in memory.
    LoadBytes(Vec<u8>),
    /// Delete one record by 0-based position.
    DeleteAt(usize),
    /// Delete several records by 0-based positions (pre-batch state).
    DeleteMany(Vec<usize>),
    /// Reset the store.
    Clear,
    /// Export into the configured directory.
    Export,
    /// Export into the given directory.
    ExportTo(PathBuf),
}

/// Outcome of one dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSessionOutcome {
    /// Message to show.
    pub status: SpecStatusMessage,
    /// Store state after the command.
    pub snapshot: SpecStoreSnapshot,
    /// Written file, when the command exported successfully.
    pub path_file_out: Option<PathBuf>,
}

impl SpecSessionOutcome {
    /// Whether the command failed or was a no-op.
    pub fn is_failure(&self) -> bool {
        matches!(
            self.status.level,
            EnumStatusLevel::Warning | EnumStatusLevel::Danger
        )
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Errors raised by reader, store and exporter operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PprError {
    /// Payload is not a readable spreadsheet.
    DecodeFailure(String),
    /// Filesystem read/write failed.
    Io {
        /// Path involved in the failed operation.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
    /// Export requested on an empty store.
    NoDataToExport,
    /// Delete position outside the store.
    IndexOutOfRange {
        /// Requested 0-based position.
        position: usize,
        /// Store length at the time of the request.
        len: usize,
    },
    /// Bulk delete requested with no positions.
    NoSelection,
    /// Derived export file name would leave the output directory.
    InvalidFileName(String),
}

impl fmt::Display for PprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DecodeFailure(msg) => write!(f, "{msg}"),
            Self::Io { path, message } => write!(f, "{}: {message}", path.display()),
            Self::NoDataToExport => write!(f, "No data to export"),
            Self::IndexOutOfRange { position, len } => {
                write!(f, "Position {position} is out of range (len={len})")
            }
            Self::NoSelection => write!(f, "No rows selected"),
            Self::InvalidFileName(name) => write!(f, "Invalid export file name: {name:?}"),
        }
    }
}

impl std::error::Error for PprError {}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_fields_follow_export_order() {
        let mut record = SpecPprRecord::new("REF1".to_string(), "ISBN1".to_string());
        record.set_line_number("00001".to_string());

        assert_eq!(record.fields(), ["REF1", "00001", "ISBN1", "AR", "OK"]);
        assert_eq!(record.status(), "AR");
        assert_eq!(record.result(), "OK");
    }

    #[test]
    fn error_display_is_user_facing() {
        assert_eq!(
            PprError::IndexOutOfRange {
                position: 4,
                len: 2
            }
            .to_string(),
            "Position 4 is out of range (len=2)"
        );
        assert_eq!(PprError::NoDataToExport.to_string(), "No data to export");
        assert_eq!(
            PprError::Io {
                path: PathBuf::from("out/x.PPR"),
                message: "denied".to_string()
            }
            .to_string(),
            "out/x.PPR: denied"
        );
    }

    #[test]
    fn status_message_display_includes_level() {
        let msg = SpecStatusMessage::new(EnumStatusLevel::Warning, "No rows selected");
        assert_eq!(msg.to_string(), "[warning] No rows selected");
    }
}
