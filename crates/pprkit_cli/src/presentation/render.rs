use pprkit_io_xlsx::{SpecPprRecord, SpecStatusMessage};

const TUP_TABLE_HEADER: [&str; 5] = ["Reference", "Line", "ISBN", "Status", "Result"];

/// Render records as a left-aligned text table.
pub fn render_records_table(records: &[SpecPprRecord]) -> String {
    if records.is_empty() {
        return "No data loaded".to_string();
    }

    let mut l_widths = TUP_TABLE_HEADER.map(str::len);
    for record in records {
        for (n_idx, c_field) in record.fields().iter().enumerate() {
            l_widths[n_idx] = l_widths[n_idx].max(c_field.chars().count());
        }
    }

    let mut l_lines = Vec::with_capacity(records.len() + 1);
    l_lines.push(render_row(&TUP_TABLE_HEADER, &l_widths));
    for record in records {
        l_lines.push(render_row(&record.fields(), &l_widths));
    }
    l_lines.join("\n")
}

fn render_row(fields: &[&str; 5], widths: &[usize; 5]) -> String {
    fields
        .iter()
        .zip(widths.iter().copied())
        .map(|(c_field, n_width)| format!("{c_field:<n_width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// One-line status for terminal output.
pub fn render_status(status: &SpecStatusMessage) -> String {
    status.to_string()
}
