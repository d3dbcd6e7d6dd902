//! First-sheet spreadsheet reader built on calamine.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{Data, Range, Reader, Sheets, open_workbook_auto, open_workbook_auto_from_rs};
use chrono::Timelike;
use tracing::debug;

use crate::spec::{EnumRawCell, PprError};

/// Decode the first worksheet of the spreadsheet at `path` into raw rows.
///
/// The format (xlsx, xlsm, xlsb, xls, ods) is picked from the extension.
pub fn read_rows_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<EnumRawCell>>, PprError> {
    let path_file_in = path.as_ref();
    if !path_file_in.is_file() {
        return Err(PprError::Io {
            path: path_file_in.to_path_buf(),
            message: "Input is not a readable file.".to_string(),
        });
    }

    let mut workbook = open_workbook_auto(path_file_in).map_err(|e| {
        PprError::DecodeFailure(format!(
            "Failed to open spreadsheet {}: {e}",
            path_file_in.display()
        ))
    })?;
    read_rows_from_first_sheet(&mut workbook)
}

/// Decode the first worksheet of an in-memory spreadsheet payload.
///
/// The format is sniffed from the payload content.
pub fn read_rows_from_bytes(bytes: &[u8]) -> Result<Vec<Vec<EnumRawCell>>, PprError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| PprError::DecodeFailure(format!("Failed to decode spreadsheet: {e}")))?;
    read_rows_from_first_sheet(&mut workbook)
}

fn read_rows_from_first_sheet<RS>(
    workbook: &mut Sheets<RS>,
) -> Result<Vec<Vec<EnumRawCell>>, PprError>
where
    RS: Read + Seek,
{
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| PprError::DecodeFailure("Spreadsheet contains no sheets.".to_string()))?
        .map_err(|e| PprError::DecodeFailure(format!("Failed to read first sheet: {e}")))?;

    let l_rows = derive_raw_rows_from_range(&range);
    debug!(n_rows = l_rows.len(), "decoded first sheet");
    Ok(l_rows)
}

/// Convert a used range into rows anchored at column A.
///
/// calamine starts the range at the first used cell; leading columns are
/// padded with [`EnumRawCell::None`] so column indices stay absolute.
pub(crate) fn derive_raw_rows_from_range(range: &Range<Data>) -> Vec<Vec<EnumRawCell>> {
    let Some((_, n_col_start)) = range.start() else {
        return Vec::new();
    };
    let n_col_offset = n_col_start as usize;

    range
        .rows()
        .map(|row| {
            let mut l_cells = Vec::with_capacity(n_col_offset + row.len());
            l_cells.resize(n_col_offset, EnumRawCell::None);
            l_cells.extend(row.iter().map(convert_data_to_raw_cell));
            l_cells
        })
        .collect()
}

/// Map one calamine cell onto [`EnumRawCell`].
pub(crate) fn convert_data_to_raw_cell(cell: &Data) -> EnumRawCell {
    match cell {
        Data::Empty => EnumRawCell::None,
        Data::String(s) => EnumRawCell::String(s.clone()),
        Data::Float(n) => EnumRawCell::Number(*n),
        Data::Int(n) => EnumRawCell::Number(*n as f64),
        Data::Bool(b) => EnumRawCell::Boolean(*b),
        Data::Error(e) => EnumRawCell::Error(e.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) if !dt.is_duration() => {
                let if_midnight = ndt.hour() == 0 && ndt.minute() == 0 && ndt.second() == 0;
                let c_fmt = if if_midnight {
                    "%Y-%m-%d"
                } else {
                    "%Y-%m-%dT%H:%M:%S"
                };
                EnumRawCell::DateTime(ndt.format(c_fmt).to_string())
            }
            _ => EnumRawCell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => EnumRawCell::DateTime(s.clone()),
    }
}
