//! End-to-end report pipeline.
//!
//! Orchestrates one run:
//!   1. Search the source for identifiers matching the query
//!   2. Fetch raw records for those identifiers
//!   3. Classify each record (absent fields fall back to sentinels)
//!   4. Assemble report rows in source order
//!
//! Transport errors from the source abort the run; nothing is emitted.

use tracing::{debug, field, info, instrument, Span};
use uuid::Uuid;

use crate::classify::AffiliationClassifier;
use crate::report::{assemble, ReportRow};
use crate::sources::LiteratureSource;

/// Default cap on search results.
pub const DEFAULT_MAX_RESULTS: usize = 200;

// ── Result summary ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub run_id: Uuid,
    pub query: String,
    pub ids_found: usize,
    pub records_fetched: usize,
    pub records_classified: usize,
    pub duration_ms: u64,
    pub rows: Vec<ReportRow>,
}

// ── Pipeline orchestrator ─────────────────────────────────────────────────────

/// Runs search → fetch → classify → assemble for one query.
///
/// `on_ids` is called once with the identifier list before records are
/// fetched, so callers can report progress.
#[instrument(skip(source, classifier, on_ids), fields(run_id = field::Empty))]
pub async fn run_pipeline<F>(
    source: &dyn LiteratureSource,
    classifier: &AffiliationClassifier,
    query: &str,
    max_results: usize,
    on_ids: F,
) -> anyhow::Result<PipelineResult>
where
    F: FnOnce(&[String]),
{
    let run_id = Uuid::new_v4();
    Span::current().record("run_id", field::display(run_id));
    let t0 = std::time::Instant::now();
    info!(query, max_results, "Starting report pipeline");

    // ── 1. Search ─────────────────────────────────────────────────────────────
    let ids = source.search(query, max_results).await?;
    on_ids(&ids);
    debug!(n = ids.len(), "Search complete");

    // ── 2. Fetch ──────────────────────────────────────────────────────────────
    let raw_records = source.fetch_records(&ids).await?;

    // ── 3. Classify ───────────────────────────────────────────────────────────
    let records_fetched = raw_records.len();
    let classified: Vec<_> = raw_records
        .into_iter()
        .map(|raw| classifier.classify(raw))
        .collect();
    let records_classified = classified.len();

    // ── 4. Assemble ───────────────────────────────────────────────────────────
    let rows = assemble(classified);

    let result = PipelineResult {
        run_id,
        query: query.to_string(),
        ids_found: ids.len(),
        records_fetched,
        records_classified,
        duration_ms: t0.elapsed().as_millis() as u64,
        rows,
    };

    info!(
        ids_found          = result.ids_found,
        records_fetched    = result.records_fetched,
        records_classified = result.records_classified,
        duration_ms        = result.duration_ms,
        "Report pipeline complete"
    );

    Ok(result)
}
