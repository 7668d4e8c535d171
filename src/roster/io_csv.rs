// Primitives for reading CSV exports.

use crate::roster::*;

/// Parses a CSV export: the first record is the header, all the other records are kept
/// in source order. Every record must have as many fields as the header.
pub fn parse_csv_table(contents: &[u8]) -> RosterResult<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(contents);

    let headers: Vec<String> = rdr
        .headers()
        .context(ParsingCsvSnafu {})?
        .iter()
        .enumerate()
        .map(|(idx, h)| {
            // Some exports start with a byte order mark.
            if idx == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();
    debug!("parse_csv_table: header: {:?}", headers);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, record_r) in rdr.records().enumerate() {
        let record = record_r.context(ParsingCsvSnafu {})?;
        let row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
        debug!("parse_csv_table: row {}: {:?}", idx, row);
        rows.push(row);
    }
    Ok(RawTable { headers, rows })
}
