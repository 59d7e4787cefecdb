//! Live PubMed search and classification.
//!
//! Run with: cargo test --package pharmyx-ingestion --test test_pubmed_ingestion -- --ignored --nocapture

use pharmyx_ingestion::classify::AffiliationClassifier;
use pharmyx_ingestion::pipeline::run_pipeline;
use pharmyx_ingestion::sources::pubmed::{PubMedClient, PubMedConfig};
use pharmyx_ingestion::sources::LiteratureSource;

#[tokio::test]
#[ignore] // Requires network access
async fn test_pubmed_search_kras() {
    let client = PubMedClient::new(PubMedConfig::default()).expect("client");

    let ids = client
        .search("KRAS[tiab] AND pancreatic cancer[tiab]", 5)
        .await
        .expect("PubMed search failed");
    println!("Found {} PMIDs: {:?}", ids.len(), ids);
    assert!(!ids.is_empty(), "Should find at least one paper");

    let records = client.fetch_records(&ids).await.expect("PubMed fetch failed");
    assert_eq!(records.len(), ids.len());
}

#[tokio::test]
#[ignore] // Requires network access
async fn test_pubmed_pipeline_end_to_end() {
    let client = PubMedClient::new(PubMedConfig::default()).expect("client");
    let classifier = AffiliationClassifier::default();

    let result = run_pipeline(&client, &classifier, "pharmaceutical KRAS inhibitor", 10, |_| {})
        .await
        .expect("pipeline failed");

    for row in &result.rows {
        println!("\n---");
        println!("PMID: {}", row.pubmed_id);
        println!("Title: {}", row.title);
        println!("Company: {}", row.company_affiliations);
        println!("Email: {}", row.corresponding_email);
    }

    assert_eq!(result.records_classified, result.records_fetched);
}
