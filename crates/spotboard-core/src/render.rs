//! ClassifiedTable → HTML table markup.
//!
//! Styling is inline so the markup can be dropped into any container
//! without a stylesheet. Header rows and header-cell highlights are fixed by
//! position; spot rows are styled from their classification.

use chrono::{DateTime, Utc};

use crate::classify::ClassifiedTable;
use crate::types::{AGE_COLUMN, NEW_COLUMN};

pub const HEADER_FONT: &str = "normal bold 20px arial,serif";
pub const HEADER_BACKGROUND: &str = "cyan";
pub const NEW_SPOT_FONT: &str = "oblique bold 20px arial,serif";

/// Header cells over the label and the last age column.
pub const ACCENT_BACKGROUND: &str = "lightcyan";
/// Header cells over the county and "new" columns.
pub const SECONDARY_BACKGROUND: &str = "skyblue";

/// id of the element whose content the table replaces.
pub const CONTAINER_ID: &str = "t1";

/// Caption shown when the table on display is from an earlier tick because
/// later refreshes failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleNotice {
    pub last_success: DateTime<Utc>,
    pub failed_refreshes: u32,
}

impl StaleNotice {
    pub fn message(&self) -> String {
        let plural = if self.failed_refreshes == 1 { "" } else { "es" };
        format!(
            "Stale data: last updated {} ({} failed refresh{plural})",
            self.last_success.format("%H:%M:%S UTC"),
            self.failed_refreshes,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    pub title: String,
    /// Emit a `<meta http-equiv="refresh">` with this many seconds.
    pub refresh_secs: Option<u64>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: "QSO Party Spots".to_string(),
            refresh_secs: None,
        }
    }
}

/// Render the table markup: one `<tr>` per feed line, header rows first.
pub fn render_table(table: &ClassifiedTable, notice: Option<&StaleNotice>) -> String {
    let mut out = String::from("<table>\n");

    if let Some(notice) = notice {
        out.push_str(&format!(
            "<caption class=\"stale\">{}</caption>\n",
            escape_html(&notice.message())
        ));
    }

    for (row, line) in table.header.lines().into_iter().enumerate() {
        push_row(
            &mut out,
            line.iter().map(String::as_str),
            Some(HEADER_FONT),
            HEADER_BACKGROUND,
            |column| header_cell_background(row, column),
        );
    }

    for classified in &table.rows {
        push_row(
            &mut out,
            classified.spot.fields(),
            classified.emphasized.then_some(NEW_SPOT_FONT),
            classified.band.background(),
            |_| None,
        );
    }

    out.push_str("</table>\n");
    out
}

/// Wrap the table in a standalone page with the display container.
pub fn render_document(
    table: &ClassifiedTable,
    notice: Option<&StaleNotice>,
    opts: &PageOptions,
) -> String {
    let refresh = opts
        .refresh_secs
        .map(|secs| format!("<meta http-equiv=\"refresh\" content=\"{secs}\">\n"))
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n{refresh}<title>{}</title>\n</head>\n<body>\n<div id=\"{CONTAINER_ID}\">\n{}</div>\n</body>\n</html>\n",
        escape_html(&opts.title),
        render_table(table, notice),
    )
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Fixed highlights over the header rows, addressed by (header row, column).
fn header_cell_background(row: usize, column: usize) -> Option<&'static str> {
    match (row, column) {
        (0, AGE_COLUMN) | (1, AGE_COLUMN) => Some(ACCENT_BACKGROUND),
        (1, 1) | (1, NEW_COLUMN) => Some(SECONDARY_BACKGROUND),
        _ => None,
    }
}

/// Cell class used to look up the "new" and "age" columns in the page.
fn column_class(column: usize) -> Option<&'static str> {
    match column {
        NEW_COLUMN => Some("new"),
        AGE_COLUMN => Some("age"),
        _ => None,
    }
}

fn push_row<'a>(
    out: &mut String,
    fields: impl IntoIterator<Item = &'a str>,
    font: Option<&str>,
    background: &str,
    cell_background: impl Fn(usize) -> Option<&'static str>,
) {
    out.push_str("<tr style=\"");
    if let Some(font) = font {
        out.push_str(&format!("font: {font}; "));
    }
    out.push_str(&format!("background-color: {background}\">"));

    for (column, field) in fields.into_iter().enumerate() {
        out.push_str("<td");
        if let Some(class) = column_class(column) {
            out.push_str(&format!(" class=\"{class}\""));
        }
        if let Some(bg) = cell_background(column) {
            out.push_str(&format!(" style=\"background-color: {bg}\""));
        }
        out.push_str(&format!(">{}</td>", escape_html(field)));
    }

    out.push_str("</tr>\n");
}
