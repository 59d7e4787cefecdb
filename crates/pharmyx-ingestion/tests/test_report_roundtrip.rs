//! CSV report written to disk and read back.

use pretty_assertions::assert_eq;

use pharmyx_ingestion::classify::classify;
use pharmyx_ingestion::medline::parse_medline;
use pharmyx_ingestion::report::{assemble, write_csv_file, HEADER};

const MEDLINE: &str = "
PMID- 31000001
TI  - Biotech partnerships in oncology, a review.
AU  - Nguyen T
AD  - Biotech Research Labs, info@biotechlabs.org
AD  - Harvard Medical School

PMID- 31000002
TI  - A paper without affiliations.
";

#[test]
fn test_written_report_reads_back() {
    let records = parse_medline(MEDLINE).unwrap();
    let classified: Vec<_> = records.into_iter().map(classify).collect();
    let n_classified = classified.len();
    let rows = assemble(classified);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.csv");
    let written = write_csv_file(&path, &rows).unwrap();
    assert_eq!(written, n_classified);

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(header, HEADER.to_vec());

    let read_rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(read_rows.len(), n_classified);

    let first: Vec<&str> = read_rows[0].iter().collect();
    assert_eq!(
        first,
        vec![
            "31000001",
            "Biotech partnerships in oncology, a review.",
            "Nguyen T",
            "No Date Available",
            "No Journal Available",
            "Biotech Research Labs, info@biotechlabs.org",
            "Biotech Research Labs, info@biotechlabs.org",
            "info@biotechlabs.org",
        ]
    );

    let second: Vec<&str> = read_rows[1].iter().collect();
    assert_eq!(second[2], "");
    assert_eq!(&second[5..], &["N/A", "N/A", "N/A"]);
}

#[test]
fn test_empty_report_has_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    assert_eq!(write_csv_file(&path, &[]).unwrap(), 0);

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 1);

    let mut reader = csv::Reader::from_path(&path).unwrap();
    assert_eq!(reader.headers().unwrap().len(), HEADER.len());
    assert_eq!(reader.records().count(), 0);
}
