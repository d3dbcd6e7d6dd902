//! Stateless helpers shared by the normalizer, store and exporter.

use crate::conf::{F_NUMBER_INTEGRAL_TEXT_MAX, N_WIDTH_LINE_NUMBER};
use crate::spec::EnumRawCell;

////////////////////////////////////////////////////////////////////////////////
// #region CellValueConversion

/// Whether a raw cell counts as present for blank-row filtering.
///
/// Empty text, zero, NaN, `false` and missing cells are absent.
pub fn is_cell_truthy(cell: &EnumRawCell) -> bool {
    match cell {
        EnumRawCell::None => false,
        EnumRawCell::String(s) => !s.is_empty(),
        EnumRawCell::Number(n) => *n != 0.0 && !n.is_nan(),
        EnumRawCell::Boolean(b) => *b,
        EnumRawCell::DateTime(_) | EnumRawCell::Error(_) => true,
    }
}

/// Whether a raw row has no truthy cell (zero-length rows included).
pub fn is_row_blank(row: &[EnumRawCell]) -> bool {
    !row.iter().any(is_cell_truthy)
}

/// Textual form of a raw cell as written into a record field.
pub fn convert_cell_to_text(cell: &EnumRawCell) -> String {
    match cell {
        EnumRawCell::None => String::new(),
        EnumRawCell::String(s) => s.clone(),
        EnumRawCell::Number(n) => convert_number_to_text(*n),
        EnumRawCell::Boolean(b) => b.to_string(),
        EnumRawCell::DateTime(s) | EnumRawCell::Error(s) => s.clone(),
    }
}

/// Render a number the way a spreadsheet user typed it.
///
/// Integral values below 1e15 drop the fraction so numeric ISBNs survive intact.
pub fn convert_number_to_text(x: f64) -> String {
    if x.is_finite() && x.fract() == 0.0 && x.abs() < F_NUMBER_INTEGRAL_TEXT_MAX {
        return format!("{}", x as i64);
    }
    format!("{x}")
}

/// Text of column `col_idx`, or empty when the row is shorter.
pub fn derive_column_text(row: &[EnumRawCell], col_idx: usize) -> String {
    row.get(col_idx).map(convert_cell_to_text).unwrap_or_default()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region LineNumbering

/// Zero-padded line number for a 0-based position.
///
/// Positions past 99999 keep their natural width.
pub fn format_line_number(position_0based: usize) -> String {
    format!(
        "{:0>width$}",
        position_0based + 1,
        width = N_WIDTH_LINE_NUMBER
    )
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FileNameValidation

/// Reject export file names that would leave the output directory.
pub fn validate_export_file_name(file_name: &str) -> Result<(), String> {
    if file_name.is_empty() || file_name == "." || file_name == ".." {
        return Err(format!("Export file name is not a file: {file_name:?}"));
    }
    if file_name.contains(['/', '\\', '\0']) {
        return Err(format!(
            "Export file name contains a path separator: {file_name:?}"
        ));
    }
    Ok(())
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_cell_truthy_matches_absent_values() {
        assert!(!is_cell_truthy(&EnumRawCell::None));
        assert!(!is_cell_truthy(&EnumRawCell::String(String::new())));
        assert!(!is_cell_truthy(&EnumRawCell::Number(0.0)));
        assert!(!is_cell_truthy(&EnumRawCell::Number(f64::NAN)));
        assert!(!is_cell_truthy(&EnumRawCell::Boolean(false)));

        assert!(is_cell_truthy(&EnumRawCell::String(" ".to_string())));
        assert!(is_cell_truthy(&EnumRawCell::Number(-1.5)));
        assert!(is_cell_truthy(&EnumRawCell::Boolean(true)));
        assert!(is_cell_truthy(&EnumRawCell::DateTime("2024-01-15".to_string())));
        assert!(is_cell_truthy(&EnumRawCell::Error("#N/A".to_string())));
    }

    #[test]
    fn test_is_row_blank() {
        assert!(is_row_blank(&[]));
        assert!(is_row_blank(&[
            EnumRawCell::String(String::new()),
            EnumRawCell::Number(0.0),
            EnumRawCell::None,
        ]));
        assert!(!is_row_blank(&[
            EnumRawCell::None,
            EnumRawCell::String("x".to_string()),
        ]));
    }

    #[test]
    fn test_convert_number_to_text() {
        assert_eq!(convert_number_to_text(9781234567890.0), "9781234567890");
        assert_eq!(convert_number_to_text(0.0), "0");
        assert_eq!(convert_number_to_text(-42.0), "-42");
        assert_eq!(convert_number_to_text(1.5), "1.5");
        assert_eq!(convert_number_to_text(f64::INFINITY), "inf");
    }

    #[test]
    fn test_convert_cell_to_text() {
        assert_eq!(convert_cell_to_text(&EnumRawCell::None), "");
        assert_eq!(convert_cell_to_text(&EnumRawCell::Boolean(false)), "false");
        assert_eq!(
            convert_cell_to_text(&EnumRawCell::Error("#DIV/0!".to_string())),
            "#DIV/0!"
        );
    }

    #[test]
    fn test_derive_column_text_short_row() {
        let row = vec![EnumRawCell::String("REF".to_string())];
        assert_eq!(derive_column_text(&row, 0), "REF");
        assert_eq!(derive_column_text(&row, 2), "");
    }

    #[test]
    fn test_format_line_number() {
        assert_eq!(format_line_number(0), "00001");
        assert_eq!(format_line_number(41), "00042");
        assert_eq!(format_line_number(99_998), "99999");
        assert_eq!(format_line_number(99_999), "100000");
    }

    #[test]
    fn test_validate_export_file_name() {
        assert!(validate_export_file_name("T1.MREF1.PPR").is_ok());
        assert!(validate_export_file_name("T1.M.PPR").is_ok());
        assert!(validate_export_file_name("T1.M../x.PPR").is_err());
        assert!(validate_export_file_name("T1.M..\\x.PPR").is_err());
        assert!(validate_export_file_name("..").is_err());
        assert!(validate_export_file_name("").is_err());
    }
}
