use crate::error::Result;
use crate::normalize::{is_indian_state, normalize};
use crate::schema::flow;
use crate::types::{MigrationRecord, RawRow};
use crate::util::{count_or_zero, non_negative};
use csv::{ByteRecord, ReaderBuilder};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableReport {
    pub total_rows: usize,
    pub unreadable_rows: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub total_rows: usize,
    pub kept_rows: usize,
    pub zero_count: usize,
    pub self_loops: usize,
    pub non_domestic: usize,
}

pub fn read_table(path: impl AsRef<Path>) -> Result<Vec<RawRow>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let (rows, report) = read_table_from_reader(file)?;
    debug!(
        path = %path.display(),
        rows = report.total_rows,
        unreadable = report.unreadable_rows,
        "read table"
    );
    Ok(rows)
}

/// Parse delimited text with a header row into string-keyed rows.
///
/// Bytes are decoded lossily so stray Latin-1 characters in place names do
/// not sink the whole row. Short rows simply lack the trailing columns.
/// Header and cell text is kept verbatim apart from a leading BOM; names are
/// trimmed later by `normalize` and counts by the numeric parser.
pub fn read_table_from_reader<R: Read>(reader: R) -> Result<(Vec<RawRow>, TableReport)> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers: Vec<String> = rdr
        .byte_headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let text = String::from_utf8_lossy(h);
            let text = if i == 0 { text.trim_start_matches('\u{feff}') } else { text.as_ref() };
            text.to_string()
        })
        .collect();

    let mut rows = Vec::new();
    let mut report = TableReport::default();
    let mut record = ByteRecord::new();
    loop {
        match rdr.read_byte_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(_) => {
                report.total_rows += 1;
                report.unreadable_rows += 1;
                continue;
            }
        }
        report.total_rows += 1;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.clone(), String::from_utf8_lossy(v).into_owned()))
            .collect();
        rows.push(row);
    }
    Ok((rows, report))
}

/// First alias whose cell is present and non-empty.
///
/// A whitespace-only cell is not empty: it wins and later coerces to 0.
pub fn resolve<'a>(row: &'a RawRow, aliases: &[&str]) -> Option<&'a str> {
    aliases
        .iter()
        .filter_map(|h| row.get(*h))
        .map(|v| v.as_str())
        .find(|v| !v.is_empty())
}

fn resolve_count(row: &RawRow, aliases: &[&str]) -> i64 {
    count_or_zero(resolve(row, aliases))
}

/// Direct category total, or males + females when the total is absent or 0.
fn resolve_area_total(row: &RawRow, total: &[&str], males: &[&str], females: &[&str]) -> u64 {
    let direct = non_negative(resolve_count(row, total));
    if direct > 0 {
        return direct;
    }
    non_negative(resolve_count(row, males)) + non_negative(resolve_count(row, females))
}

enum Verdict {
    Keep(MigrationRecord),
    ZeroCount,
    SelfLoop,
    NonDomestic,
}

fn classify(row: &RawRow) -> Verdict {
    let destination = normalize(resolve(row, flow::DESTINATION).unwrap_or(""));
    let origin = normalize(resolve(row, flow::ORIGIN).unwrap_or(""));

    let count = resolve_count(row, flow::TOTAL);
    let male = non_negative(resolve_count(row, flow::MALE));
    let female = non_negative(resolve_count(row, flow::FEMALE));
    let rural = resolve_area_total(row, flow::RURAL_TOTAL, flow::RURAL_MALE, flow::RURAL_FEMALE);
    let urban = resolve_area_total(row, flow::URBAN_TOTAL, flow::URBAN_MALE, flow::URBAN_FEMALE);

    if count <= 0 {
        return Verdict::ZeroCount;
    }
    if origin == destination {
        return Verdict::SelfLoop;
    }
    if !is_indian_state(&origin) || !is_indian_state(&destination) {
        return Verdict::NonDomestic;
    }
    Verdict::Keep(MigrationRecord {
        origin,
        destination,
        count: non_negative(count),
        male,
        female,
        rural,
        urban,
    })
}

/// Turn raw flow-table rows into canonical domestic records.
///
/// Rows with no positive count, self-loops and flows touching a non-Indian
/// place are dropped silently. Input order is preserved.
pub fn ingest(rows: &[RawRow]) -> Vec<MigrationRecord> {
    ingest_with_report(rows).0
}

pub fn ingest_with_report(rows: &[RawRow]) -> (Vec<MigrationRecord>, IngestReport) {
    let mut report = IngestReport { total_rows: rows.len(), ..Default::default() };
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        match classify(row) {
            Verdict::Keep(r) => records.push(r),
            Verdict::ZeroCount => report.zero_count += 1,
            Verdict::SelfLoop => report.self_loops += 1,
            Verdict::NonDomestic => report.non_domestic += 1,
        }
    }
    report.kept_rows = records.len();
    info!(
        kept = report.kept_rows,
        zero_count = report.zero_count,
        self_loops = report.self_loops,
        non_domestic = report.non_domestic,
        "Loaded {} migration records",
        report.kept_rows
    );
    (records, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn reads_headers_and_cells() {
        let text = "\u{feff}AreaName,BirthPlace,Total\nKerala, Goa ,12\nBihar\n";
        let (rows, report) = read_table_from_reader(text.as_bytes()).unwrap();
        assert_eq!(report.total_rows, 2);
        assert_eq!(rows[0].get("AreaName").map(String::as_str), Some("Kerala"));
        assert_eq!(rows[0].get("BirthPlace").map(String::as_str), Some(" Goa "));
        assert_eq!(rows[1].get("Total"), None);
        assert_eq!(ingest(&rows)[0].origin, "GOA");
    }

    #[test]
    fn header_text_must_match_exactly() {
        let text = "AreaName,BirthPlace, Total\nKerala,Goa,12\n";
        let (rows, _) = read_table_from_reader(text.as_bytes()).unwrap();
        assert_eq!(rows[0].get(" Total").map(String::as_str), Some("12"));
        assert_eq!(resolve(&rows[0], flow::TOTAL), None);
        assert!(ingest(&rows).is_empty());
    }

    #[test]
    fn blank_primary_cell_coerces_to_zero() {
        let r = row(&[("Total_Persons", "  "), ("Total", "40")]);
        assert_eq!(resolve(&r, flow::TOTAL), Some("  "));
        assert_eq!(resolve_count(&r, flow::TOTAL), 0);
    }

    #[test]
    fn lossy_decoding_keeps_the_row() {
        let mut bytes = b"AreaName,BirthPlace,Total\nKerala,Go".to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b",5\n");
        let (rows, _) = read_table_from_reader(bytes.as_slice()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Total").map(String::as_str), Some("5"));
    }

    #[test]
    fn empty_primary_alias_falls_through() {
        let r = row(&[("Total_Persons", ""), ("Total", "40")]);
        assert_eq!(resolve(&r, flow::TOTAL), Some("40"));
        let r = row(&[("Total_Persons", "0"), ("Total", "40")]);
        assert_eq!(resolve(&r, flow::TOTAL), Some("0"));
        assert_eq!(resolve(&row(&[]), flow::TOTAL), None);
    }

    #[test]
    fn area_totals_fall_back_to_gender_split() {
        let r = row(&[
            ("AreaName", "Kerala"),
            ("BirthPlace", "Goa"),
            ("Total", "100"),
            ("Rural_Total", "0"),
            ("Rural_Males", "30"),
            ("Rural_Females", "20"),
            ("Urban_Males", "x"),
            ("Urban_Females", "50"),
        ]);
        let records = ingest(&[r]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rural, 50);
        assert_eq!(records[0].urban, 50);
    }

    #[test]
    fn drops_invalid_rows_and_reports_why() {
        let rows = vec![
            row(&[("AreaName", "Kerala"), ("BirthPlace", "Goa"), ("Total", "0")]),
            row(&[("AreaName", "Kerala"), ("BirthPlace", "KERALA"), ("Total", "9")]),
            row(&[("AreaName", "Kerala"), ("BirthPlace", "Nepal"), ("Total", "9")]),
            row(&[("AreaName", "India"), ("BirthPlace", "Goa"), ("Total", "9")]),
            row(&[("AreaName", "Kerala"), ("BirthPlace", "Goa"), ("Total", "abc")]),
            row(&[("AreaName", "State - Kerala (32)"), ("BirthPlace", "Goa"), ("Total", "7")]),
        ];
        let (records, report) = ingest_with_report(&rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].destination, "KERALA");
        assert_eq!(records[0].count, 7);
        assert_eq!(
            report,
            IngestReport { total_rows: 6, kept_rows: 1, zero_count: 2, self_loops: 1, non_domestic: 2 }
        );
    }

    #[test]
    fn negative_subfields_clamp_to_zero() {
        let r = row(&[("AreaName", "Goa"), ("BirthPlace", "Kerala"), ("Total", "10"), ("Male", "-4")]);
        let records = ingest(&[r]);
        assert_eq!(records[0].male, 0);
    }
}
