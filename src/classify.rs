//! Cell value classification.
//!
//! Every non-blank cell is one of three things: a number (becomes a
//! relationship property), a timestamp (serialized to ISO-8601 text, then
//! treated as categorical), or categorical text (becomes a node). The
//! numeric check runs BEFORE the timestamp check; spreadsheet storage
//! types keep the two apart in practice, but the order is fixed here so
//! ambiguous values classify deterministically.

use calamine::{Data, DataType};
use chrono::NaiveDateTime;

/// Textual form used when a timestamp cell is stored in the graph. Neo4j
/// temporal types are not used; the value is an opaque string.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A classified, owned cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Timestamp(NaiveDateTime),
    Text(String),
}

/// True for cells that are absent for import purposes: empty cells and
/// whitespace-only strings. Blank cells are omitted from row records,
/// never stored as null entries.
pub fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// True iff the cell converts losslessly to an `f64`: numeric storage
/// types, booleans (1.0 / 0.0), and strings that parse as floats.
pub fn is_numeric(cell: &Data) -> bool {
    match cell {
        Data::Int(_) | Data::Float(_) | Data::Bool(_) => true,
        Data::String(s) => s.trim().parse::<f64>().is_ok(),
        _ => false,
    }
}

/// True iff the cell's storage type is a date/time. No string parsing is
/// attempted - a string that merely looks like a date stays categorical.
pub fn is_timestamp(cell: &Data) -> bool {
    matches!(cell, Data::DateTime(_) | Data::DateTimeIso(_))
}

/// Classify a cell. Returns `None` for blank cells.
pub fn classify(cell: &Data) -> Option<CellValue> {
    if is_blank(cell) {
        return None;
    }
    if is_numeric(cell) {
        return numeric_value(cell).map(CellValue::Number);
    }
    if is_timestamp(cell) {
        if let Some(dt) = cell.as_datetime() {
            return Some(CellValue::Timestamp(dt));
        }
    }
    Some(CellValue::Text(render_text(cell)))
}

fn numeric_value(cell: &Data) -> Option<f64> {
    match cell {
        Data::Int(i) => Some(*i as f64),
        Data::Float(f) => Some(*f),
        Data::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Data::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn render_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::ExcelDateTime;
    use pretty_assertions::assert_eq;

    #[test]
    fn numeric_storage_types_are_numeric() {
        assert!(is_numeric(&Data::Int(42)));
        assert!(is_numeric(&Data::Float(1.5)));
        assert!(is_numeric(&Data::Bool(true)));
    }

    #[test]
    fn numeric_strings_are_numeric() {
        assert!(is_numeric(&Data::String("120".into())));
        assert!(is_numeric(&Data::String(" 3.25 ".into())));
        assert!(!is_numeric(&Data::String("West".into())));
        assert!(!is_numeric(&Data::String("12 units".into())));
    }

    #[test]
    fn timestamps_are_typed_not_parsed() {
        assert!(is_timestamp(&Data::DateTimeIso("2017-01-09T10:59:37".into())));
        // A string that looks like a date is still a string.
        assert!(!is_timestamp(&Data::String("2017-01-09".into())));
        // A datetime is never numeric, even though Excel stores it as a serial.
        assert!(!is_numeric(&Data::DateTime(ExcelDateTime::new(
            42736.0,
            calamine::ExcelDateTimeType::DateTime,
            false,
        ))));
    }

    #[test]
    fn blank_cells_classify_to_none() {
        assert_eq!(classify(&Data::Empty), None);
        assert_eq!(classify(&Data::String("   ".into())), None);
    }

    #[test]
    fn numeric_check_runs_before_timestamp_check() {
        // A numeric string classifies as a number even if some library
        // would also accept it as a date.
        assert_eq!(
            classify(&Data::String("2024".into())),
            Some(CellValue::Number(2024.0))
        );
    }

    #[test]
    fn classify_covers_all_three_kinds() {
        assert_eq!(
            classify(&Data::Float(120.0)),
            Some(CellValue::Number(120.0))
        );
        assert_eq!(
            classify(&Data::String("West".into())),
            Some(CellValue::Text("West".into()))
        );
        match classify(&Data::DateTimeIso("2017-01-09T10:59:37".into())) {
            Some(CellValue::Timestamp(dt)) => {
                assert_eq!(
                    dt.format(TIMESTAMP_FORMAT).to_string(),
                    "2017-01-09T10:59:37"
                );
            }
            other => panic!("expected timestamp, got {other:?}"),
        }
    }

    #[test]
    fn booleans_convert_numerically() {
        assert_eq!(classify(&Data::Bool(true)), Some(CellValue::Number(1.0)));
        assert_eq!(classify(&Data::Bool(false)), Some(CellValue::Number(0.0)));
    }
}
