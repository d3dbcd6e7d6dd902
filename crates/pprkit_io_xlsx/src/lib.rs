//! `pprkit_io_xlsx` v1:
//! Rust-side spreadsheet to PPR conversion kernel.
//!
//! Architecture:
//! - `conf`      : constants and default presets
//! - `spec`      : records/options/errors
//! - `util`      : pure helper functions
//! - `reader`    : first-sheet decoder (calamine)
//! - `normalize` : raw rows to numbered records
//! - `store`     : mutable record store with renumbering
//! - `exporter`  : PPR payload rendering and file write
//! - `session`   : controller owning the store for one session
pub mod conf;
pub mod exporter;
pub mod normalize;
pub mod reader;
pub mod session;
pub mod spec;
pub mod store;
pub mod util;

#[cfg(test)]
mod testing;

pub use conf::{
    C_EXPORT_FILE_PREFIX, C_EXPORT_FILE_SUFFIX, C_EXPORT_MIME_TYPE, C_RECORD_RESULT,
    C_RECORD_STATUS, N_WIDTH_LINE_NUMBER, derive_default_export_options,
    derive_default_session_options,
};
pub use exporter::{build_export_payload, derive_export_file_name, export_records, render_payload};
pub use normalize::normalize_rows;
pub use reader::{read_rows_from_bytes, read_rows_from_path};
pub use session::PprSession;
pub use spec::{
    EnumRawCell, EnumSessionCommand, EnumStatusLevel, PprError, SpecExportOptions,
    SpecExportPayload, SpecExportReport, SpecPprRecord, SpecSessionOptions, SpecSessionOutcome,
    SpecStatusMessage, SpecStoreSnapshot,
};
pub use store::RowStore;
pub use util::{convert_cell_to_text, format_line_number, is_cell_truthy};
