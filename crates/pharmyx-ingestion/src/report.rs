//! Report assembly and output sinks.

use std::io::Write;
use std::path::Path;

use pharmyx_common::Result;

use crate::models::{sentinel, ClassifiedRecord};

/// Column headers written at the top of a CSV report.
pub const HEADER: [&str; 8] = [
    "PubMed ID",
    "Title",
    "Authors",
    "Publication Date",
    "Journal",
    "Non-academic Authors",
    "Company Affiliation(s)",
    "Corresponding Author Email",
];

/// One output row, in [`HEADER`] column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub pubmed_id: String,
    pub title: String,
    pub authors: String,
    pub publication_date: String,
    pub journal: String,
    pub non_academic_affiliations: String,
    pub company_affiliations: String,
    pub corresponding_email: String,
}

impl ReportRow {
    pub fn fields(&self) -> [&str; 8] {
        [
            self.pubmed_id.as_str(),
            self.title.as_str(),
            self.authors.as_str(),
            self.publication_date.as_str(),
            self.journal.as_str(),
            self.non_academic_affiliations.as_str(),
            self.company_affiliations.as_str(),
            self.corresponding_email.as_str(),
        ]
    }
}

impl From<ClassifiedRecord> for ReportRow {
    fn from(rec: ClassifiedRecord) -> Self {
        Self {
            pubmed_id: rec.identifier,
            title: rec.title,
            authors: rec.authors.join(", "),
            publication_date: rec.publication_date,
            journal: rec.journal,
            non_academic_affiliations: join_or_sentinel(&rec.non_academic_affiliations),
            company_affiliations: join_or_sentinel(&rec.company_affiliations),
            corresponding_email: rec.corresponding_email,
        }
    }
}

fn join_or_sentinel(items: &[String]) -> String {
    if items.is_empty() {
        sentinel::NOT_AVAILABLE.to_string()
    } else {
        items.join("; ")
    }
}

/// Fold classified records into rows, preserving input order.
pub fn assemble(records: impl IntoIterator<Item = ClassifiedRecord>) -> Vec<ReportRow> {
    records.into_iter().map(ReportRow::from).collect()
}

/// Write the header and all rows as comma-separated values with `\n` line endings.
/// Returns the number of data rows written.
pub fn write_csv<W: Write>(writer: W, rows: &[ReportRow]) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(HEADER)?;
    for row in rows {
        wtr.write_record(row.fields())?;
    }
    wtr.flush()?;
    Ok(rows.len())
}

/// Create (or truncate) `path` and write the CSV report to it.
pub fn write_csv_file(path: impl AsRef<Path>, rows: &[ReportRow]) -> Result<usize> {
    let file = std::fs::File::create(path.as_ref())?;
    write_csv(std::io::BufWriter::new(file), rows)
}

/// Print each row's full tuple on its own line; no header.
pub fn print_rows<W: Write>(mut out: W, rows: &[ReportRow]) -> Result<()> {
    for row in rows {
        writeln!(out, "{:?}", row.fields())?;
    }
    out.flush()?;
    Ok(())
}
