//! Raw rows to PPR records.

use tracing::debug;

use crate::conf::{N_COL_IDX_ISBN, N_COL_IDX_REFERENCE, N_NROWS_HEADER};
use crate::spec::{EnumRawCell, SpecPprRecord};
use crate::util::{derive_column_text, format_line_number, is_row_blank};

/// Normalize raw sheet rows into numbered records.
///
/// - Fewer than two rows (header only, or nothing) yields no records.
/// - The header row is dropped.
/// - Rows without a single truthy cell are dropped.
/// - `reference` comes from column A, `isbn` from column C; column B and
///   anything past C are not read.
/// - Line numbers count the kept rows, not the source rows.
pub fn normalize_rows(rows: &[Vec<EnumRawCell>]) -> Vec<SpecPprRecord> {
    if rows.len() <= N_NROWS_HEADER {
        return Vec::new();
    }

    let l_rows_body = &rows[N_NROWS_HEADER..];
    let mut l_records: Vec<SpecPprRecord> = l_rows_body
        .iter()
        .filter(|row| !is_row_blank(row))
        .map(|row| {
            SpecPprRecord::new(
                derive_column_text(row, N_COL_IDX_REFERENCE),
                derive_column_text(row, N_COL_IDX_ISBN),
            )
        })
        .collect();

    debug!(
        n_rows_body = l_rows_body.len(),
        n_rows_blank = l_rows_body.len() - l_records.len(),
        "normalized sheet rows"
    );

    apply_line_numbers(&mut l_records);
    l_records
}

/// Rewrite every line number from its position.
pub(crate) fn apply_line_numbers(records: &mut [SpecPprRecord]) {
    for (n_idx, record) in records.iter_mut().enumerate() {
        record.set_line_number(format_line_number(n_idx));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(x: &str) -> EnumRawCell {
        EnumRawCell::String(x.to_string())
    }

    #[test]
    fn test_normalize_rows_worked_example() {
        let rows = vec![
            vec![s("H1"), s("H2"), s("H3")],
            vec![s("REF1"), s("x"), s("ISBN1")],
            vec![s(""), s(""), s("")],
            vec![s("REF2"), s("y"), s("ISBN2")],
        ];

        let records = normalize_rows(&rows);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fields(), ["REF1", "00001", "ISBN1", "AR", "OK"]);
        assert_eq!(records[1].fields(), ["REF2", "00002", "ISBN2", "AR", "OK"]);
    }

    #[test]
    fn test_normalize_rows_needs_two_rows() {
        assert!(normalize_rows(&[]).is_empty());
        assert!(normalize_rows(&[vec![s("H1"), s("H2"), s("H3")]]).is_empty());
    }

    #[test]
    fn test_normalize_rows_keeps_partially_filled_rows() {
        let rows = vec![
            vec![s("H1")],
            vec![],
            vec![EnumRawCell::None, EnumRawCell::Number(0.0)],
            vec![EnumRawCell::None, s("only-b")],
            vec![s("REF3")],
        ];

        let records = normalize_rows(&rows);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].reference(), "");
        assert_eq!(records[0].isbn(), "");
        assert_eq!(records[0].line_number(), "00001");
        assert_eq!(records[1].reference(), "REF3");
        assert_eq!(records[1].isbn(), "");
        assert_eq!(records[1].line_number(), "00002");
    }

    #[test]
    fn test_normalize_rows_converts_non_text_cells() {
        let rows = vec![
            vec![s("H")],
            vec![
                EnumRawCell::Number(1001.0),
                EnumRawCell::None,
                EnumRawCell::Number(9781234567890.0),
                s("ignored"),
            ],
            vec![
                EnumRawCell::DateTime("2024-01-15".to_string()),
                EnumRawCell::None,
                EnumRawCell::Boolean(true),
            ],
        ];

        let records = normalize_rows(&rows);
        assert_eq!(records[0].reference(), "1001");
        assert_eq!(records[0].isbn(), "9781234567890");
        assert_eq!(records[1].reference(), "2024-01-15");
        assert_eq!(records[1].isbn(), "true");
    }

    #[test]
    fn test_normalize_rows_count_matches_truthy_rows() {
        let mut rows = vec![vec![s("header")]];
        for n_idx in 0..50 {
            if n_idx % 3 == 0 {
                rows.push(vec![s(""), EnumRawCell::Number(0.0)]);
            } else {
                rows.push(vec![s(&format!("R{n_idx}"))]);
            }
        }
        let n_truthy = rows[1..].iter().filter(|r| !is_row_blank(r)).count();

        let records = normalize_rows(&rows);
        assert_eq!(records.len(), n_truthy);
        for (n_idx, record) in records.iter().enumerate() {
            assert_eq!(record.line_number(), format!("{:05}", n_idx + 1));
        }
    }
}
