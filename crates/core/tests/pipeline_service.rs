//! Lead pipeline service behaviour over an in-memory directory

mod support;

use std::sync::Arc;

use abacus_core::LeadPipelineService;
use abacus_domain::{AbacusError, LeadQuery, LeadStatus, LeadUpdate};
use support::lead;
use support::mocks::InMemoryDirectory;

fn directory() -> InMemoryDirectory {
    InMemoryDirectory::new(vec![
        lead("a", LeadStatus::New),
        lead("b", LeadStatus::Contacted),
        lead("c", LeadStatus::Qualified),
        lead("d", LeadStatus::ClosedWon),
        lead("e", LeadStatus::ClosedLost),
        lead("f", LeadStatus::New),
    ])
}

#[tokio::test]
async fn overview_counts_statuses_on_the_page() {
    let service = LeadPipelineService::new(Arc::new(directory()));

    let overview = service.overview(&LeadQuery::default()).await.unwrap();

    assert_eq!(overview.page.leads.len(), 6);
    assert_eq!(overview.page.pagination.pages, 1);
    assert_eq!(overview.stats.total, 6);
    assert_eq!(overview.stats.new, 2);
    assert_eq!(overview.stats.contacted, 1);
    assert_eq!(overview.stats.qualified, 1);
    assert_eq!(overview.stats.closed_won, 1);
}

#[tokio::test]
async fn overview_passes_query_through() {
    let dir = directory();
    let service = LeadPipelineService::new(Arc::new(dir.clone()));
    let query = LeadQuery { page: 2, limit: 4, ..LeadQuery::default() };

    let overview = service.overview(&query).await.unwrap();

    assert_eq!(dir.queries(), vec![query]);
    assert_eq!(overview.page.leads.len(), 2);
    assert_eq!(overview.page.pagination.page, 2);
    assert_eq!(overview.page.pagination.pages, 2);
}

#[tokio::test]
async fn zero_page_size_is_rejected_before_any_call() {
    let dir = directory();
    let service = LeadPipelineService::new(Arc::new(dir.clone()));

    let err = service.overview(&LeadQuery { limit: 0, ..LeadQuery::default() }).await.unwrap_err();

    assert!(matches!(err, AbacusError::InvalidInput(_)));
    assert!(dir.queries().is_empty());
}

#[tokio::test]
async fn update_applies_status_and_notes() {
    let service = LeadPipelineService::new(Arc::new(directory()));
    let update =
        LeadUpdate { status: Some(LeadStatus::ProposalSent), notes: Some("Sent deck".into()) };

    let record = service.update(" c ", &update).await.unwrap();

    assert_eq!(record.id, "c");
    assert_eq!(record.status, LeadStatus::ProposalSent);
    assert_eq!(record.notes.as_deref(), Some("Sent deck"));
}

#[tokio::test]
async fn update_validates_input() {
    let service = LeadPipelineService::new(Arc::new(directory()));

    let blank_id = service
        .update("  ", &LeadUpdate { status: Some(LeadStatus::New), notes: None })
        .await
        .unwrap_err();
    assert!(matches!(blank_id, AbacusError::InvalidInput(_)));

    let empty = service.update("a", &LeadUpdate::default()).await.unwrap_err();
    assert!(matches!(empty, AbacusError::InvalidInput(_)));

    let missing = service
        .update("zzz", &LeadUpdate { status: Some(LeadStatus::New), notes: None })
        .await
        .unwrap_err();
    assert!(matches!(missing, AbacusError::NotFound(_)));
}
