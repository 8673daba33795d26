//! Application context - dependency injection container

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use abacus_core::{
    LeadDirectory, LeadIntake, LeadPipelineService, ListingCatalogService, ListingDirectory,
    SpaceCalculator,
};
use abacus_domain::{Config, Result};
use abacus_infra::{config, LeadsApiClient, ListingsApiClient};
use tracing::{debug, info};

/// Type alias for lead intake port trait object
pub type DynLeadIntake = dyn LeadIntake + Send + Sync + 'static;

/// Type alias for lead directory port trait object
pub type DynLeadDirectory = dyn LeadDirectory + Send + Sync + 'static;

/// Type alias for listing directory port trait object
pub type DynListingDirectory = dyn ListingDirectory + Send + Sync + 'static;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub intake: Arc<DynLeadIntake>,
    pub pipeline: Arc<LeadPipelineService>,
    pub catalog: Arc<ListingCatalogService>,
}

impl AppContext {
    /// Load configuration (explicit file, probed file or defaults, then
    /// environment overrides) and wire the HTTP API clients behind the ports.
    pub fn load(config_path: Option<PathBuf>, api_url: Option<&str>) -> Result<Self> {
        let mut config = config::load(config_path)?;
        if let Some(url) = api_url {
            debug!(base_url = url, "api url overridden from command line");
            config.api.base_url = url.to_string();
            config::validate(&config)?;
        }
        Self::new(config)
    }

    /// Wire the context against the API described by `config`.
    pub fn new(config: Config) -> Result<Self> {
        let client = Arc::new(LeadsApiClient::from_config(&config.api)?);
        info!(
            base_url = %client.leads_url(),
            timeout_seconds = config.api.timeout_seconds,
            "lead api client ready"
        );

        let listings: Arc<DynListingDirectory> =
            Arc::new(ListingsApiClient::from_config(&config.api)?);

        let intake: Arc<DynLeadIntake> = client.clone();
        let directory: Arc<DynLeadDirectory> = client;
        Ok(Self::with_ports(config, intake, directory, listings))
    }

    /// Wire the context against arbitrary port implementations.
    pub fn with_ports(
        config: Config,
        intake: Arc<DynLeadIntake>,
        directory: Arc<DynLeadDirectory>,
        listings: Arc<DynListingDirectory>,
    ) -> Self {
        let pipeline = Arc::new(LeadPipelineService::new(directory));
        let catalog = Arc::new(ListingCatalogService::new(listings));
        Self { config, intake, pipeline, catalog }
    }

    /// How long a single lead submission may take.
    pub fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.config.calculator.submit_timeout_seconds)
    }

    /// A fresh calculator session using the configured submit timeout.
    pub fn calculator(&self) -> SpaceCalculator {
        SpaceCalculator::new()
            .with_submit_timeout(self.submit_timeout())
    }
}
