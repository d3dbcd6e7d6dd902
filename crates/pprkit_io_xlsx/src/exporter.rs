//! PPR export payload rendering and file write.

use std::fs;
use std::io::Write;

use tracing::info;

use crate::conf::{
    C_EXPORT_FIELD_SEP, C_EXPORT_FILE_PREFIX, C_EXPORT_FILE_SUFFIX, C_EXPORT_LINE_SEP,
    C_EXPORT_MIME_TYPE,
};
use crate::spec::{
    PprError, SpecExportOptions, SpecExportPayload, SpecExportReport, SpecPprRecord,
};
use crate::util::validate_export_file_name;

/// Serialize records as `reference,lineNumber,isbn,status,result` lines.
///
/// Lines are joined by `\n` with no header and no trailing newline. Fields
/// are not quoted.
pub fn render_payload(records: &[SpecPprRecord]) -> Result<String, PprError> {
    if records.is_empty() {
        return Err(PprError::NoDataToExport);
    }

    Ok(records
        .iter()
        .map(|record| record.fields().join(C_EXPORT_FIELD_SEP))
        .collect::<Vec<_>>()
        .join(C_EXPORT_LINE_SEP))
}

/// `T1.M<reference>.PPR`, named after the first record.
pub fn derive_export_file_name(records: &[SpecPprRecord]) -> Result<String, PprError> {
    let record_first = records.first().ok_or(PprError::NoDataToExport)?;
    Ok(format!(
        "{C_EXPORT_FILE_PREFIX}{}{C_EXPORT_FILE_SUFFIX}",
        record_first.reference()
    ))
}

/// Build file name, content and MIME type in one step.
pub fn build_export_payload(records: &[SpecPprRecord]) -> Result<SpecExportPayload, PprError> {
    Ok(SpecExportPayload {
        file_name: derive_export_file_name(records)?,
        content: render_payload(records)?,
        mime_type: C_EXPORT_MIME_TYPE,
    })
}

/// Write the export file into `options.dir_output`.
///
/// Nothing is written when `records` is empty.
pub fn export_records(
    records: &[SpecPprRecord],
    options: &SpecExportOptions,
) -> Result<SpecExportReport, PprError> {
    let payload = build_export_payload(records)?;
    validate_export_file_name(&payload.file_name).map_err(PprError::InvalidFileName)?;

    let path_dir_out = &options.dir_output;
    fs::create_dir_all(path_dir_out).map_err(|e| PprError::Io {
        path: path_dir_out.clone(),
        message: e.to_string(),
    })?;

    let path_file_out = path_dir_out.join(&payload.file_name);
    let mut file_out = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(options.if_overwrite)
        .create_new(!options.if_overwrite)
        .open(&path_file_out)
        .map_err(|e| PprError::Io {
            path: path_file_out.clone(),
            message: e.to_string(),
        })?;
    file_out
        .write_all(payload.content.as_bytes())
        .map_err(|e| PprError::Io {
            path: path_file_out.clone(),
            message: e.to_string(),
        })?;

    info!(
        path = %path_file_out.display(),
        n_records = records.len(),
        "exported PPR file"
    );

    Ok(SpecExportReport {
        path_file_out,
        cnt_records: records.len(),
        cnt_bytes: payload.content.len(),
    })
}
