//! Lead API client
//!
//! `POST {base}/leads` for calculator leads and property report requests;
//! `GET {base}/leads` and `PUT {base}/leads/{id}` for the back office.

use std::time::Duration;

use abacus_core::{LeadDirectory, LeadIntake, SubmissionError};
use abacus_domain::constants::{
    LEADS_PATH, REPORT_REJECTED_FALLBACK, SUBMISSION_REJECTED_FALLBACK,
};
use abacus_domain::{
    AbacusError, ApiConfig, CreatedLead, LeadPage, LeadQuery, LeadRecord, LeadSource,
    LeadSubmission, LeadUpdate, Pagination, Result,
};
use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::envelope::read_envelope;
use super::errors::ApiError;
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Client for the lead REST API.
#[derive(Clone)]
pub struct LeadsApiClient {
    http: HttpClient,
    leads_url: Url,
}

impl LeadsApiClient {
    /// Create a client for `base_url` (e.g. `http://localhost:5000/api`).
    ///
    /// # Errors
    ///
    /// Returns `AbacusError::Config` if the base URL does not parse.
    pub fn new(http: HttpClient, base_url: &str) -> Result<Self> {
        let base = base_url.trim().trim_end_matches('/');
        let leads_url = Url::parse(&format!("{base}{LEADS_PATH}"))
            .map_err(|err| AbacusError::from(InfraError::from(err)))?;
        Ok(Self { http, leads_url })
    }

    /// Build the HTTP client and API client from configuration.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let mut builder = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .max_attempts(config.max_attempts);
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        Self::new(builder.build()?, &config.base_url)
    }

    pub fn leads_url(&self) -> &Url {
        &self.leads_url
    }

    fn lead_url(&self, id: &str) -> Result<Url> {
        let mut url = self.leads_url.clone();
        url.path_segments_mut()
            .map_err(|()| AbacusError::Config("API base URL can not hold a path".into()))?
            .push(id);
        Ok(url)
    }
}

#[async_trait]
impl LeadIntake for LeadsApiClient {
    #[instrument(
        skip_all,
        fields(source = %submission.source(), total_area = submission.total_area())
    )]
    async fn create_lead(
        &self,
        submission: &LeadSubmission,
    ) -> std::result::Result<CreatedLead, SubmissionError> {
        let request = self.http.request(Method::POST, self.leads_url.clone()).json(submission);

        let result = match self.http.send_once(request).await {
            Ok(response) => read_envelope::<CreatedLead>(response).await,
            Err(err) => Err(ApiError::from_reqwest(&err)),
        };

        match result {
            Ok(envelope) => {
                let lead = envelope.data.unwrap_or_default();
                info!(lead_id = lead.id.as_deref().unwrap_or("-"), "lead created");
                Ok(lead)
            }
            Err(err) => {
                warn!(error_type = err.label(), error = %err, "lead creation failed");
                Err(err.into_submission_error(rejected_fallback(submission.source())))
            }
        }
    }
}

/// Message shown when the API refuses a lead without saying why.
fn rejected_fallback(source: LeadSource) -> &'static str {
    match source {
        LeadSource::PropertyReport => REPORT_REJECTED_FALLBACK,
        _ => SUBMISSION_REJECTED_FALLBACK,
    }
}

#[async_trait]
impl LeadDirectory for LeadsApiClient {
    #[instrument(skip_all, fields(page = query.page, limit = query.limit))]
    async fn list_leads(&self, query: &LeadQuery) -> Result<LeadPage> {
        let request = self
            .http
            .request(Method::GET, self.leads_url.clone())
            .query(&query.to_query_pairs());

        let response = self.http.send(request).await?;
        let envelope = read_envelope::<Vec<LeadRecord>>(response).await?;

        let leads = envelope.data.unwrap_or_default();
        let pagination = envelope.pagination.unwrap_or(Pagination {
            page: query.page.max(1),
            pages: 1,
            total: Some(leads.len() as u64),
        });
        debug!(count = leads.len(), pages = pagination.pages, "leads listed");

        Ok(LeadPage { leads, pagination })
    }

    #[instrument(skip_all, fields(lead_id = %id))]
    async fn update_lead(&self, id: &str, update: &LeadUpdate) -> Result<LeadRecord> {
        let request = self.http.request(Method::PUT, self.lead_url(id)?).json(update);

        let response = self
            .http
            .send_once(request)
            .await
            .map_err(|err| AbacusError::from(ApiError::from_reqwest(&err)))?;
        let envelope = read_envelope::<LeadRecord>(response).await?;

        let record = envelope
            .data
            .ok_or_else(|| AbacusError::Remote("update response did not include the lead".into()))?;
        debug!(status = %record.status, "lead updated");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> LeadsApiClient {
        LeadsApiClient::new(HttpClient::new().unwrap(), base).unwrap()
    }

    #[test]
    fn leads_url_ignores_trailing_slash() {
        let expected = "http://localhost:5000/api/leads";
        assert_eq!(client("http://localhost:5000/api/").leads_url().as_str(), expected);
        assert_eq!(client("http://localhost:5000/api").leads_url().as_str(), expected);
    }

    #[test]
    fn lead_url_escapes_id() {
        let url = client("http://localhost:5000/api").lead_url("a b/c").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/leads/a%20b%2Fc");
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let err = LeadsApiClient::new(HttpClient::new().unwrap(), "not a url").err().unwrap();
        assert!(matches!(err, AbacusError::Config(_)));
    }
}
