//! PPR export constants and default option factories.

use crate::spec::{SpecExportOptions, SpecSessionOptions};

/// Zero-padded width of the `lineNumber` field.
pub const N_WIDTH_LINE_NUMBER: usize = 5;
/// Raw column holding the order reference (column A).
pub const N_COL_IDX_REFERENCE: usize = 0;
/// Raw column holding the ISBN (column C).
pub const N_COL_IDX_ISBN: usize = 2;
/// Number of leading raw rows treated as header.
pub const N_NROWS_HEADER: usize = 1;

/// Status tag written for every record.
pub const C_RECORD_STATUS: &str = "AR";
/// Result tag written for every record.
pub const C_RECORD_RESULT: &str = "OK";

/// Export field separator.
pub const C_EXPORT_FIELD_SEP: &str = ",";
/// Export line separator.
pub const C_EXPORT_LINE_SEP: &str = "\n";
/// Export file name prefix (before the reference).
pub const C_EXPORT_FILE_PREFIX: &str = "T1.M";
/// Export file name suffix (after the reference).
pub const C_EXPORT_FILE_SUFFIX: &str = ".PPR";
/// MIME type advertised for the export payload.
pub const C_EXPORT_MIME_TYPE: &str = "text/csv";

/// Integral floats below this magnitude render without a fraction.
pub const F_NUMBER_INTEGRAL_TEXT_MAX: f64 = 1e15;

/// Build default export options (current directory, overwrite enabled).
pub fn derive_default_export_options() -> SpecExportOptions {
    SpecExportOptions::default()
}

/// Build default session options.
pub fn derive_default_session_options() -> SpecSessionOptions {
    SpecSessionOptions::default()
}
