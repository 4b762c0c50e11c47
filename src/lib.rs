pub mod client;
pub mod config;
pub mod driver;
pub mod error;
pub mod flows;
pub mod mapper;
pub mod model;

pub use client::MealieClient;
pub use config::ImporterConfig;
pub use driver::{ImportReport, Importer};
pub use error::ImportError;
pub use flows::{CreateFetchFlow, CreatePatchFlow, FlowFactory, UploadFlow};
pub use model::{MealieRecipe, MelaRecipe};

use log::info;
use std::time::Duration;

/// Import every Mela export in the configured directory into Mealie.
///
/// Resolves the credential (exchanging the API key for a short-lived
/// token when configured), builds the upload flow named by the
/// configuration, and drives the import to completion. Per-file
/// failures are collected in the returned report; only configuration
/// problems abort the run.
pub async fn import_directory(config: &ImporterConfig) -> Result<ImportReport, ImportError> {
    let api_key = config.api_key.clone().ok_or(ImportError::MissingApiKey)?;
    let timeout = Duration::from_secs(config.timeout);

    let token = if config.exchange_token {
        MealieClient::exchange_api_key(&config.host, &api_key, timeout).await?
    } else {
        api_key
    };

    let client = MealieClient::new(&config.host, token, timeout)?;
    let flow = FlowFactory::create(&config.flow)?;
    info!("Using upload flow '{}'", flow.flow_name());

    Importer::new(client, flow, config).run().await
}
