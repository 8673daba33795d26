//! Integration tests for the back-office lead listing and updates

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use abacus_core::LeadDirectory;
use abacus_domain::{AbacusError, LeadQuery, LeadSource, LeadStatus, LeadUpdate};
use abacus_infra::{HttpClient, LeadsApiClient};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> LeadsApiClient {
    let http = HttpClient::builder()
        .timeout(Duration::from_secs(5))
        .max_attempts(3)
        .base_backoff(Duration::from_millis(5))
        .build()
        .expect("http client");
    LeadsApiClient::new(http, &format!("{}/api/", server.uri())).expect("lead client")
}

fn lead_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "name": "Meera",
        "company": "Contoso",
        "designation": "Head of Admin",
        "phone": "080 1234",
        "email": "meera@contoso.com",
        "source": "spacecalculator",
        "status": status,
        "totalArea": 620,
        "createdAt": "2024-05-01T10:30:00Z"
    })
}

#[tokio::test]
async fn lists_leads_with_filters_and_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/leads"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "10"))
        .and(query_param("search", "contoso"))
        .and(query_param("source", "spacecalculator"))
        .and(query_param("status", "qualified"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [lead_json("l1", "qualified"), lead_json("l2", "qualified")],
            "pagination": {"page": 2, "pages": 3, "total": 22}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let query = LeadQuery {
        page: 2,
        limit: 10,
        search: Some("contoso".into()),
        source: Some(LeadSource::SpaceCalculator),
        status: Some(LeadStatus::Qualified),
    };
    let page = client_for(&server).list_leads(&query).await.expect("lead page");

    assert_eq!(page.leads.len(), 2);
    assert_eq!(page.leads[0].id, "l1");
    assert_eq!(page.leads[0].total_area, 620);
    assert_eq!(page.pagination.page, 2);
    assert_eq!(page.pagination.pages, 3);
    assert_eq!(page.pagination.total, Some(22));
}

#[tokio::test]
async fn list_retries_server_errors() {
    let server = MockServer::start().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_clone = calls.clone();
    Mock::given(method("GET"))
        .and(path("/api/leads"))
        .respond_with(move |_req: &wiremock::Request| -> ResponseTemplate {
            if calls_clone.fetch_add(1, Ordering::SeqCst) == 0 {
                ResponseTemplate::new(503)
            } else {
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "data": [lead_json("l1", "new")]}))
            }
        })
        .expect(2)
        .mount(&server)
        .await;

    let page = client_for(&server).list_leads(&LeadQuery::default()).await.expect("lead page");

    assert_eq!(page.leads.len(), 1);
    assert_eq!(page.pagination.page, 1);
    assert_eq!(page.pagination.pages, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn list_failure_after_retries_is_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"message": "db down"})))
        .expect(3)
        .mount(&server)
        .await;

    let err = client_for(&server).list_leads(&LeadQuery::default()).await.unwrap_err();

    match err {
        AbacusError::Remote(msg) => assert!(msg.contains("db down")),
        other => panic!("expected remote error, got {:?}", other),
    }
}

#[tokio::test]
async fn list_internal_error_is_reported_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": ""})))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).list_leads(&LeadQuery::default()).await.unwrap_err();

    assert_eq!(err, AbacusError::Remote("HTTP 500 Internal Server Error".into()));
}

#[tokio::test]
async fn updates_lead_status_and_notes() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/leads/l7"))
        .and(body_json(json!({"status": "closed_won", "notes": "Signed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "_id": "l7",
                "name": "Meera",
                "status": "closed_won",
                "notes": "Signed"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let update = LeadUpdate { status: Some(LeadStatus::ClosedWon), notes: Some("Signed".into()) };
    let record = client_for(&server).update_lead("l7", &update).await.expect("updated lead");

    assert_eq!(record.id, "l7");
    assert_eq!(record.status, LeadStatus::ClosedWon);
    assert_eq!(record.notes.as_deref(), Some("Signed"));
}

#[tokio::test]
async fn update_of_unknown_lead_is_not_found_and_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"success": false, "message": "Lead not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let update = LeadUpdate { status: Some(LeadStatus::Contacted), notes: None };
    let err = client_for(&server).update_lead("missing", &update).await.unwrap_err();

    assert!(matches!(err, AbacusError::NotFound(msg) if msg.contains("Lead not found")));
}
