//! Data models for the classification pipeline.

use std::collections::BTreeMap;

/// MEDLINE tags read by the classifier.
pub mod tags {
    pub const PMID: &str = "PMID";
    pub const TITLE: &str = "TI";
    pub const AUTHOR: &str = "AU";
    pub const ABSTRACT: &str = "AB";
    pub const JOURNAL: &str = "JT";
    pub const PUB_DATE: &str = "DP";
    pub const AFFILIATION: &str = "AD";
}

/// Placeholders substituted for absent fields.
pub mod sentinel {
    pub const NOT_AVAILABLE: &str = "N/A";
    pub const NO_TITLE: &str = "No Title Available";
    pub const NO_ABSTRACT: &str = "No Abstract Available";
    pub const NO_JOURNAL: &str = "No Journal Available";
    pub const NO_DATE: &str = "No Date Available";
}

/// A field value as carried by the source: one string, or one per repeated tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Single(String),
    Multiple(Vec<String>),
}

impl FieldValue {
    /// Normalises to an ordered sequence; a lone string becomes a one-element vec.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            FieldValue::Single(s) => vec![s],
            FieldValue::Multiple(v) => v,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            FieldValue::Single(_) => 1,
            FieldValue::Multiple(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends another value, promoting `Single` to `Multiple`.
    pub(crate) fn push(&mut self, value: String) {
        match self {
            FieldValue::Single(first) => {
                let first = std::mem::take(first);
                *self = FieldValue::Multiple(vec![first, value]);
            }
            FieldValue::Multiple(v) => v.push(value),
        }
    }

    /// Mutable access to the most recently added value, for continuation lines.
    pub(crate) fn last_mut(&mut self) -> Option<&mut String> {
        match self {
            FieldValue::Single(s) => Some(s),
            FieldValue::Multiple(v) => v.last_mut(),
        }
    }
}

/// An unparsed bibliographic record keyed by field tag, as returned by the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub fields: BTreeMap<String, FieldValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tag: &str) -> Option<&FieldValue> {
        self.fields.get(tag)
    }

    pub fn remove(&mut self, tag: &str) -> Option<FieldValue> {
        self.fields.remove(tag)
    }

    /// Sets a field, replacing any previous value for the tag.
    pub fn insert(&mut self, tag: impl Into<String>, value: FieldValue) {
        self.fields.insert(tag.into(), value);
    }

    /// Adds a value for a tag, accumulating repeated tags into a sequence.
    pub fn append(&mut self, tag: &str, value: String) {
        match self.fields.get_mut(tag) {
            Some(existing) => existing.push(value),
            None => {
                self.fields.insert(tag.to_string(), FieldValue::Single(value));
            }
        }
    }

    /// The PMID if present and single-valued; used for log context.
    pub fn pmid(&self) -> Option<&str> {
        match self.fields.get(tags::PMID) {
            Some(FieldValue::Single(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A record after field extraction and affiliation classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedRecord {
    pub identifier: String,
    pub title: String,
    pub authors: Vec<String>,
    /// Extracted for completeness; not part of the report.
    pub abstract_text: String,
    pub journal: String,
    pub publication_date: String,
    pub affiliations: Vec<String>,
    pub non_academic_affiliations: Vec<String>,
    pub company_affiliations: Vec<String>,
    pub corresponding_email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_normalises_to_one_element() {
        let v = FieldValue::Single("Acme Pharma".to_string());
        assert_eq!(v.into_vec(), vec!["Acme Pharma".to_string()]);
    }

    #[test]
    fn test_multiple_passes_through() {
        let v = FieldValue::Multiple(vec![]);
        assert!(v.clone().into_vec().is_empty());
        assert!(v.is_empty());
    }

    #[test]
    fn test_append_promotes_repeated_tags() {
        let mut rec = RawRecord::new();
        rec.append(tags::AUTHOR, "Smith J".to_string());
        assert_eq!(rec.get(tags::AUTHOR), Some(&FieldValue::Single("Smith J".to_string())));

        rec.append(tags::AUTHOR, "Doe A".to_string());
        rec.append(tags::AUTHOR, "Roe B".to_string());
        assert_eq!(
            rec.get(tags::AUTHOR),
            Some(&FieldValue::Multiple(vec![
                "Smith J".to_string(),
                "Doe A".to_string(),
                "Roe B".to_string(),
            ]))
        );
    }
}
