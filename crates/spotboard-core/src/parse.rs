//! Feed text → SpotTable.
//!
//! Lines are split on line-feed only (one trailing `\r` is dropped; a `\r`
//! anywhere else is field text) and fields on comma. There is no quoting: the
//! tracker never writes quoted fields, so a comma always separates. Blank and
//! whitespace-only lines are skipped.

use crate::error::ClassifyError;
use crate::types::{FEED_COLUMNS, FeedHeader, SpotRow, SpotTable};

/// Parse feed text into a header and spot rows.
///
/// Every non-blank line must have exactly [`FEED_COLUMNS`] fields; the first
/// mismatching line fails the whole parse.
pub fn parse_feed(text: &str) -> Result<SpotTable, ClassifyError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_reader(text.as_bytes());

    let mut header_lines: Vec<[String; FEED_COLUMNS]> = Vec::with_capacity(2);
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        if is_blank(&record) {
            continue;
        }
        let line = record.position().map_or(0, csv::Position::line);
        let fields = to_fields(&record, line)?;
        if header_lines.len() < 2 {
            header_lines.push(fields);
        } else {
            rows.push(SpotRow::from_fields(fields));
        }
    }

    let mut header_lines = header_lines.into_iter();
    match (header_lines.next(), header_lines.next()) {
        (Some(stamp), Some(columns)) => Ok(SpotTable {
            header: FeedHeader { stamp, columns },
            rows,
        }),
        (stamp, _) => Err(ClassifyError::MissingHeader {
            found: usize::from(stamp.is_some()),
        }),
    }
}

/// A line with no separators and nothing but whitespace (a lone `\r` included).
fn is_blank(record: &csv::StringRecord) -> bool {
    record.len() == 1 && record[0].trim().is_empty()
}

fn to_fields(record: &csv::StringRecord, line: u64) -> Result<[String; FEED_COLUMNS], ClassifyError> {
    if record.len() != FEED_COLUMNS {
        return Err(ClassifyError::ColumnCount {
            line,
            expected: FEED_COLUMNS,
            found: record.len(),
        });
    }
    Ok(std::array::from_fn(|i| {
        let field = &record[i];
        if i == FEED_COLUMNS - 1 {
            field.strip_suffix('\r').unwrap_or(field).to_string()
        } else {
            field.to_string()
        }
    }))
}

/// Integer view of a minutes field, read the way a browser's `parseInt` reads it:
/// leading whitespace is skipped, an optional sign is accepted, then the
/// longest run of ASCII digits is taken and anything after it ignored.
///
/// Returns `None` when no digits follow (the not-a-number case).
/// Out-of-range values saturate.
pub fn parse_minutes(field: &str) -> Option<i64> {
    let s = field.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let run = rest.bytes().take_while(u8::is_ascii_digit).count();
    if run == 0 {
        return None;
    }

    let magnitude = rest.as_bytes()[..run].iter().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "10-19-2026,1430,GMT,SPOT\nQP CALL,C&IC,AGE,AGE\n";

    #[test]
    fn parse_header_and_rows() {
        let text = format!("{HEADER}A,B,10,45\nC,D,20,150\n");
        let table = parse_feed(&text).expect("should parse");
        assert_eq!(table.header.stamp[3], "SPOT");
        assert_eq!(table.header.columns[1], "C&IC");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].call, "A");
        assert_eq!(table.rows[1].age_minutes, "150");
    }

    #[test]
    fn header_only_feed_has_no_rows() {
        let table = parse_feed(HEADER).expect("should parse");
        assert!(table.rows.is_empty());
    }

    #[test]
    fn trailing_newline_and_blank_lines_skipped() {
        let text = format!("{HEADER}\nA,B,10,45\n\n\n");
        let table = parse_feed(&text).expect("should parse");
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn crlf_line_endings() {
        let text = "10-19-2026,1430,GMT,SPOT\r\nQP CALL,C&IC,AGE,AGE\r\nA,B,10,45\r\n";
        let table = parse_feed(text).expect("should parse");
        assert_eq!(table.rows[0].age_minutes, "45");
    }

    #[test]
    fn carriage_return_inside_line_is_field_text() {
        let text = format!("{HEADER}A,B,10\r,45\n");
        let table = parse_feed(&text).expect("should parse");
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].new_minutes, "10\r");
        assert_eq!(table.rows[0].new_minutes_value(), Some(10));
        assert_eq!(table.rows[0].age_minutes, "45");
    }

    #[test]
    fn only_one_trailing_carriage_return_dropped() {
        let text = format!("{HEADER}A,B,10,45\r\r\n");
        let table = parse_feed(&text).expect("should parse");
        assert_eq!(table.rows[0].age_minutes, "45\r");
    }

    #[test]
    fn whitespace_only_lines_skipped() {
        let text = format!("{HEADER}A,B,10,45\n   \n\t\r\n\r\nC,D,1,1\n");
        let table = parse_feed(&text).expect("should parse");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].call, "C");
    }

    #[test]
    fn line_numbers_count_skipped_lines() {
        let text = format!("{HEADER}   \nA,B\n");
        assert!(matches!(
            parse_feed(&text),
            Err(ClassifyError::ColumnCount { line: 4, found: 2, .. })
        ));
    }

    #[test]
    fn tracker_trailer_row_is_kept() {
        // The tracker terminates its feed with an all-empty row.
        let text = format!("{HEADER}A,B,10,45\n,,,");
        let table = parse_feed(&text).expect("should parse");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], SpotRow::default());
    }

    #[test]
    fn quotes_are_literal() {
        let text = format!("{HEADER}\"A,B\",10,45\n");
        let table = parse_feed(&text).expect("should parse");
        assert_eq!(table.rows[0].call, "\"A");
        assert_eq!(table.rows[0].county, "B\"");
    }

    #[test]
    fn too_few_fields_names_the_line() {
        let text = format!("{HEADER}A,B,10,45\nC,D,20\n");
        match parse_feed(&text) {
            Err(ClassifyError::ColumnCount {
                line,
                expected,
                found,
            }) => {
                assert_eq!(line, 4);
                assert_eq!(expected, 4);
                assert_eq!(found, 3);
            }
            other => panic!("expected ColumnCount, got {other:?}"),
        }
    }

    #[test]
    fn too_many_fields_is_an_error() {
        let text = format!("{HEADER}A,B,10,45,extra\n");
        assert!(matches!(
            parse_feed(&text),
            Err(ClassifyError::ColumnCount { found: 5, .. })
        ));
    }

    #[test]
    fn malformed_header_is_an_error() {
        let text = "10-19-2026,1430\nQP CALL,C&IC,AGE,AGE\n";
        assert!(matches!(
            parse_feed(text),
            Err(ClassifyError::ColumnCount { line: 1, found: 2, .. })
        ));
    }

    #[test]
    fn missing_header_lines() {
        assert!(matches!(
            parse_feed(""),
            Err(ClassifyError::MissingHeader { found: 0 })
        ));
        assert!(matches!(
            parse_feed("10-19-2026,1430,GMT,SPOT\n"),
            Err(ClassifyError::MissingHeader { found: 1 })
        ));
    }

    #[test]
    fn parse_minutes_plain() {
        assert_eq!(parse_minutes("0"), Some(0));
        assert_eq!(parse_minutes("45"), Some(45));
        assert_eq!(parse_minutes("181"), Some(181));
    }

    #[test]
    fn parse_minutes_like_parse_int() {
        assert_eq!(parse_minutes("  12"), Some(12));
        assert_eq!(parse_minutes("12abc"), Some(12));
        assert_eq!(parse_minutes("-5"), Some(-5));
        assert_eq!(parse_minutes("+5"), Some(5));
        assert_eq!(parse_minutes("3.9"), Some(3));
    }

    #[test]
    fn parse_minutes_not_a_number() {
        assert_eq!(parse_minutes(""), None);
        assert_eq!(parse_minutes("AGE"), None);
        assert_eq!(parse_minutes("-"), None);
        assert_eq!(parse_minutes("x12"), None);
    }

    #[test]
    fn parse_minutes_saturates() {
        assert_eq!(parse_minutes("99999999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_minutes("-99999999999999999999999"), Some(-i64::MAX));
    }
}
