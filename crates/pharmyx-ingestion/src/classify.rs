//! Affiliation classification and field extraction.
//!
//! Turns one [`RawRecord`] into a [`ClassifiedRecord`]:
//!   - scalar fields fall back to fixed sentinels when absent
//!   - authors and affiliations are normalised to sequences
//!   - the first email-shaped substring across affiliations becomes the
//!     corresponding-author email
//!   - each affiliation is tested against a pharma/biotech vocabulary and,
//!     independently, against an academic vocabulary

use regex::Regex;
use serde::{Deserialize, Serialize};

use pharmyx_common::{PharmyxError, Result};

use crate::models::{sentinel, tags, ClassifiedRecord, FieldValue, RawRecord};

/// Keywords marking a pharmaceutical/biotech affiliation.
pub const COMPANY_KEYWORDS: &[&str] = &[
    "pharmaceutical",
    "biotech",
    "biotechnology",
    "pharma",
    "drug",
    "life sciences",
];

/// Keywords marking an academic affiliation.
pub const ACADEMIC_KEYWORDS: &[&str] = &["university", "college", "institute", "school"];

/// How vocabulary keywords are matched against affiliation text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Case-insensitive substring: "drug" also matches "drugstore".
    #[default]
    Substring,
    /// Case-insensitive, bounded by word boundaries on both sides.
    Word,
}

#[derive(Debug, Clone)]
enum Vocabulary {
    Substring(Vec<String>),
    Word(Regex),
}

impl Vocabulary {
    fn build(keywords: &[&str], mode: MatchMode) -> Result<Self> {
        match mode {
            MatchMode::Substring => Ok(Vocabulary::Substring(
                keywords.iter().map(|k| k.to_lowercase()).collect(),
            )),
            MatchMode::Word => {
                let alternation = keywords
                    .iter()
                    .map(|k| regex::escape(k))
                    .collect::<Vec<_>>()
                    .join("|");
                let re = Regex::new(&format!(r"(?i)\b(?:{})\b", alternation))
                    .map_err(|e| PharmyxError::Config(format!("invalid keyword pattern: {}", e)))?;
                Ok(Vocabulary::Word(re))
            }
        }
    }

    fn matches(&self, text: &str) -> bool {
        match self {
            Vocabulary::Substring(keywords) => {
                let lowered = text.to_lowercase();
                keywords.iter().any(|k| lowered.contains(k.as_str()))
            }
            Vocabulary::Word(re) => re.is_match(text),
        }
    }
}

/// Classifies affiliations against the company and academic vocabularies.
#[derive(Debug, Clone)]
pub struct AffiliationClassifier {
    company: Vocabulary,
    academic: Vocabulary,
}

impl Default for AffiliationClassifier {
    fn default() -> Self {
        let lower = |kws: &[&str]| -> Vec<String> { kws.iter().map(|k| k.to_lowercase()).collect() };
        Self {
            company: Vocabulary::Substring(lower(COMPANY_KEYWORDS)),
            academic: Vocabulary::Substring(lower(ACADEMIC_KEYWORDS)),
        }
    }
}

impl AffiliationClassifier {
    pub fn with_mode(mode: MatchMode) -> Result<Self> {
        Ok(Self {
            company: Vocabulary::build(COMPANY_KEYWORDS, mode)?,
            academic: Vocabulary::build(ACADEMIC_KEYWORDS, mode)?,
        })
    }

    pub fn is_company(&self, affiliation: &str) -> bool {
        self.company.matches(affiliation)
    }

    pub fn is_academic(&self, affiliation: &str) -> bool {
        self.academic.matches(affiliation)
    }

    /// Build a [`ClassifiedRecord`] from one raw record.
    ///
    /// Absent fields degrade to sentinels; a repeated text tag is joined with
    /// single spaces. Never fails.
    pub fn classify(&self, mut raw: RawRecord) -> ClassifiedRecord {
        let identifier       = take_text(&mut raw, tags::PMID, sentinel::NOT_AVAILABLE);
        let title            = take_text(&mut raw, tags::TITLE, sentinel::NO_TITLE);
        let abstract_text    = take_text(&mut raw, tags::ABSTRACT, sentinel::NO_ABSTRACT);
        let journal          = take_text(&mut raw, tags::JOURNAL, sentinel::NO_JOURNAL);
        let publication_date = take_text(&mut raw, tags::PUB_DATE, sentinel::NO_DATE);

        let authors      = take_sequence(&mut raw, tags::AUTHOR);
        let affiliations = take_sequence(&mut raw, tags::AFFILIATION);

        let corresponding_email = first_email(&affiliations)
            .unwrap_or(sentinel::NOT_AVAILABLE)
            .to_string();

        let company_affiliations = affiliations
            .iter()
            .filter(|a| self.is_company(a))
            .cloned()
            .collect();

        let non_academic_affiliations = affiliations
            .iter()
            .filter(|a| !self.is_academic(a))
            .cloned()
            .collect();

        ClassifiedRecord {
            identifier,
            title,
            authors,
            abstract_text,
            journal,
            publication_date,
            affiliations,
            non_academic_affiliations,
            company_affiliations,
            corresponding_email,
        }
    }
}

/// Classify with the default substring vocabularies.
pub fn classify(raw: RawRecord) -> ClassifiedRecord {
    AffiliationClassifier::default().classify(raw)
}

fn take_text(raw: &mut RawRecord, tag: &str, default: &str) -> String {
    match raw.remove(tag) {
        None => default.to_string(),
        Some(FieldValue::Single(s)) => s,
        Some(FieldValue::Multiple(values)) if values.is_empty() => default.to_string(),
        Some(FieldValue::Multiple(values)) => values.join(" "),
    }
}

fn take_sequence(raw: &mut RawRecord, tag: &str) -> Vec<String> {
    raw.remove(tag).map(FieldValue::into_vec).unwrap_or_default()
}

/// First email-shaped substring, scanning affiliations in order.
pub fn first_email(affiliations: &[String]) -> Option<&str> {
    let re = email_regex();
    affiliations
        .iter()
        .find_map(|aff| re.find(aff).map(|m| m.as_str()))
}

fn email_regex() -> &'static Regex {
    use std::sync::OnceLock;
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap()
    })
}
