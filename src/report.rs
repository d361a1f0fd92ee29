//! HTML rendering of the detections table.
//! Used by: handlers::report.
//!
//! Field values are inserted into the markup verbatim, with no HTML escaping.
//! A value containing `<` or `&` changes the page structure; see DESIGN.md.

use crate::error::Result;
use crate::store::sqlite::{DetectionRecord, StoreConnection};

const HEADING: &str = "<h2>Object Detection Data</h2>";
const TABLE_OPEN: &str = "<table border='1'>";
const TABLE_CLOSE: &str = "</table>";
const EMPTY_ROW: &str = "<tr><td colspan='7'>No data available</td></tr>";

pub const COLUMNS: [&str; 7] = [
    "ID",
    "Timestamp",
    "Event",
    "Object",
    "Detected Count",
    "Total Bottle",
    "Total Notebook",
];

/// A fully rendered report. Only produced when every row was read.
#[derive(Debug)]
pub struct Report {
    pub html: String,
    pub rows: usize,
}

/// Runs the detections query on `conn` and renders the whole document.
///
/// Nothing is returned on failure, so callers never see partial markup.
pub fn render_report(conn: &StoreConnection) -> Result<Report> {
    conn.with_detections(|records| {
        let mut html = String::from(HEADING);
        let rows = render_table(records, &mut html)?;
        Ok(Report { html, rows })
    })
}

/// Appends the table for `records`, in the order given, to `out`.
/// Returns the number of data rows written.
pub fn render_table<I>(records: I, out: &mut String) -> Result<usize>
where
    I: IntoIterator<Item = Result<DetectionRecord>>,
{
    out.push_str(TABLE_OPEN);
    push_header(out);

    let mut rows = 0;
    for record in records {
        push_row(&record?, out);
        rows += 1;
    }
    if rows == 0 {
        out.push_str(EMPTY_ROW);
    }

    out.push_str(TABLE_CLOSE);
    Ok(rows)
}

fn push_header(out: &mut String) {
    out.push_str("<tr>");
    for label in COLUMNS {
        out.push_str(&format!("<th>{label}</th>"));
    }
    out.push_str("</tr>");
}

fn push_row(record: &DetectionRecord, out: &mut String) {
    out.push_str("<tr>");
    for cell in record.cells() {
        out.push_str(&format!("<td>{cell}</td>"));
    }
    out.push_str("</tr>");
}
