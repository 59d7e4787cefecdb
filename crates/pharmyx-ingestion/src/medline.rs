//! MEDLINE text format parser (efetch `rettype=medline`, `retmode=text`).
//!
//! Each line is `TAG - value`, with the tag left-aligned and space-padded to
//! four columns. A line starting with six spaces continues the previous value.
//! Records are separated by blank lines. A tag that occurs more than once in a
//! record (e.g. `AU`, `AD`) accumulates into a [`FieldValue::Multiple`].

use pharmyx_common::{PharmyxError, Result};
use tracing::{debug, warn};

use crate::models::{tags, FieldValue, RawRecord};

const CONTINUATION: &str = "      ";

/// Parse a MEDLINE text document into raw records, in document order.
///
/// Lines that fit neither the tag nor the continuation shape are skipped with
/// a warning. A non-blank payload without a single `PMID` (an HTML error page,
/// say) is a service error.
pub fn parse_medline(text: &str) -> Result<Vec<RawRecord>> {
    let mut records = Vec::new();
    let mut current = RawRecord::new();
    let mut last_tag: Option<String> = None;

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');

        // Checked before the separator test: a space-only continuation marks a
        // paragraph break inside the current field, not the end of the record.
        if let Some(rest) = line.strip_prefix(CONTINUATION) {
            let value = last_tag
                .as_deref()
                .and_then(|tag| current.fields.get_mut(tag))
                .and_then(FieldValue::last_mut);
            match value {
                Some(value) => append_continuation(value, rest.trim()),
                None => warn!(line = line_no + 1, "Skipping MEDLINE continuation without a preceding tag"),
            }
            continue;
        }

        if line.trim().is_empty() {
            if !current.is_empty() {
                records.push(finish(std::mem::take(&mut current)));
            }
            last_tag = None;
            continue;
        }

        match split_tag_line(line) {
            Some((tag, value)) => {
                current.append(tag, value.to_string());
                last_tag = Some(tag.to_string());
            }
            None => {
                warn!(line = line_no + 1, content = %line, "Skipping unrecognised MEDLINE line");
                last_tag = None;
            }
        }
    }

    if !current.is_empty() {
        records.push(finish(current));
    }

    if !text.trim().is_empty() && records.iter().all(|r| r.get(tags::PMID).is_none()) {
        return Err(PharmyxError::Service(
            "efetch response contains no MEDLINE records".to_string(),
        ));
    }

    debug!(count = records.len(), "Parsed MEDLINE records");
    Ok(records)
}

/// Joins a continuation onto `value`; an empty continuation becomes a line break.
fn append_continuation(value: &mut String, rest: &str) {
    if rest.is_empty() {
        if !value.is_empty() && !value.ends_with('\n') {
            value.push('\n');
        }
        return;
    }
    if !value.is_empty() && !value.ends_with('\n') {
        value.push(' ');
    }
    value.push_str(rest);
}

/// Drops line breaks left by a blank continuation at the end of a field.
fn finish(mut record: RawRecord) -> RawRecord {
    for value in record.fields.values_mut() {
        let values: Vec<&mut String> = match value {
            FieldValue::Single(s) => vec![s],
            FieldValue::Multiple(v) => v.iter_mut().collect(),
        };
        for s in values {
            let trimmed = s.trim_end_matches('\n').len();
            s.truncate(trimmed);
        }
    }
    record
}

/// Splits `"TI  - Title text"` into `("TI", "Title text")`.
fn split_tag_line(line: &str) -> Option<(&str, &str)> {
    let tag = line.get(..4)?.trim_end();
    let sep = line.get(4..)?;
    if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    // The value may be empty, in which case the line ends right after the dash.
    let value = sep
        .strip_prefix("- ")
        .or_else(|| (sep == "-").then_some(""))?;
    Some((tag, value.trim()))
}
