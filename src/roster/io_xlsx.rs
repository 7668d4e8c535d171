use calamine::{DataType, Reader, Xlsx};
use std::io::Cursor;

use crate::roster::*;

/// Reads the first worksheet of an Excel export. The first row is the header.
pub fn parse_xlsx_table(contents: Vec<u8>) -> RosterResult<RawTable> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(contents)).context(OpeningExcelSnafu {})?;
    let wrange = workbook
        .worksheet_range_at(0)
        .context(EmptyExcelSnafu {})?
        .context(OpeningExcelSnafu {})?;

    let mut iter = wrange.rows();
    let headers: Vec<String> = match iter.next() {
        Some(header) => header.iter().map(cell_to_string).collect(),
        None => Vec::new(),
    };
    debug!("parse_xlsx_table: header: {:?}", headers);

    let rows: Vec<Vec<String>> = iter
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();
    Ok(RawTable { headers, rows })
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Empty => "".to_string(),
        // Phone numbers typed without dashes come back as floats.
        DataType::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        DataType::Float(f) => f.to_string(),
        DataType::Int(i) => i.to_string(),
        DataType::Bool(b) => b.to_string(),
        DataType::DateTime(f) => match cell.as_datetime() {
            Some(dt) => format_date(dt),
            None => f.to_string(),
        },
        other => format!("{:?}", other),
    }
}

/// Same layout as the timestamps written by the sign-up form.
fn format_date(dt: chrono::NaiveDateTime) -> String {
    dt.format("%-m/%-d/%Y %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_are_stringified() {
        assert_eq!(cell_to_string(&DataType::String("Ann".to_string())), "Ann");
        assert_eq!(cell_to_string(&DataType::Empty), "");
        assert_eq!(cell_to_string(&DataType::Float(5555550101.0)), "5555550101");
        assert_eq!(cell_to_string(&DataType::Float(1.5)), "1.5");
        assert_eq!(cell_to_string(&DataType::Int(42)), "42");
        assert_eq!(cell_to_string(&DataType::DateTime(44927.5)), "1/1/2023 12:00:00");
    }

    #[test]
    fn reads_first_sheet() {
        let contents = include_bytes!("../../testdata/roster.xlsx").to_vec();
        let table = parse_xlsx_table(contents).unwrap();
        assert_eq!(table.headers.len(), 9);
        assert_eq!(table.headers[0], "Timestamp");
        assert_eq!(table.headers[3], "Phone Number (in xxx-xxx-xxxx format)");
        assert_eq!(table.headers[8], "Member Since");
        assert_eq!(table.rows.len(), 3);
        assert_eq!(
            table.rows[0],
            vec![
                "1/5/2023 10:00:00",
                "Ann",
                "Young",
                "5555550101",
                "Mobile",
                "ann@x.org",
                "Email",
                "Target 4: The Arts!",
                "1/1/2023 12:00:00",
            ]
        );
        // Missing cells are padded.
        assert_eq!(table.rows[1][8], "");
        assert_eq!(table.rows[2][7], "");
    }

    #[test]
    fn workbook_builds_a_roster() {
        let contents = include_bytes!("../../testdata/roster.xlsx").to_vec();
        let roster = prepare_roster(parse_xlsx_table(contents).unwrap()).unwrap();
        assert_eq!(roster.extra_headers, vec!["Member Since".to_string()]);
        assert_eq!(roster.passthrough_width(), 1);
        // The second Ann Young has the same email.
        assert_eq!(roster.members.len(), 2);
        let ann = &roster.members[0];
        assert_eq!(ann.source_index, 0);
        assert_eq!(ann.phone_number, "5555550101");
        assert_eq!(ann.window_values(1)[7], "1/1/2023 12:00:00");
        let bea = &roster.members[1];
        assert_eq!(bea.source_index, 1);
        assert_eq!(bea.last_name, "Adams");

        let views = partition_committees(&roster, &COMMITTEES);
        assert_eq!(views[4].members.len(), 2);
        assert_eq!(views[5].members.len(), 1);
        let sorted: Vec<&str> = views[0]
            .sorted_members()
            .iter()
            .map(|m| m.last_name.as_str())
            .collect();
        assert_eq!(sorted, vec!["Adams", "Young"]);
    }

    #[test]
    fn workbook_without_sheet() {
        let contents = include_bytes!("../../testdata/no_sheet.xlsx").to_vec();
        let err = parse_xlsx_table(contents).unwrap_err();
        assert!(matches!(err, RosterError::EmptyExcel {}));
        assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
    }

    #[test]
    fn blank_sheet_has_no_header() {
        let contents = include_bytes!("../../testdata/blank_sheet.xlsx").to_vec();
        let table = parse_xlsx_table(contents).unwrap();
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
        assert_eq!(prepare_roster(table), Err(RosterErrors::EmptyHeader));
    }

    #[test]
    fn garbage_is_not_a_workbook() {
        let err = parse_xlsx_table(b"First Name,Last Name\n".to_vec()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
    }
}
