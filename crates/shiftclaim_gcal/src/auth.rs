// File: crates/shiftclaim_gcal/src/auth.rs
use crate::service::GcalServiceError;
use google_calendar3::{
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    yup_oauth2::{read_application_secret, InstalledFlowAuthenticator, InstalledFlowReturnMethod},
    CalendarHub,
};
use shiftclaim_config::GcalConfig;
use std::path::Path;
use tracing::info;

// Type aliases for clarity
type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type HubType = CalendarHub<Connector>;

/// Builds an authenticated calendar hub for the user's own account.
///
/// The OAuth client configuration must exist at `client_secret_path`. The
/// first run opens the browser consent page and stores the granted token at
/// `token_cache_path`; later runs reuse and refresh that token silently.
pub async fn create_calendar_hub(config: &GcalConfig) -> Result<HubType, GcalServiceError> {
    let secret_path = Path::new(&config.client_secret_path);
    let secret = read_application_secret(secret_path)
        .await
        .map_err(|e| GcalServiceError::MissingClientSecret {
            path: config.client_secret_path.clone(),
            message: e.to_string(),
        })?;

    if !Path::new(&config.token_cache_path).exists() {
        info!("No cached token found, a browser window will ask for calendar access");
    }

    let auth = InstalledFlowAuthenticator::builder(secret, InstalledFlowReturnMethod::HTTPRedirect)
        .persist_tokens_to_disk(&config.token_cache_path)
        .build()
        .await
        .map_err(|e| GcalServiceError::AuthSetup(e.to_string()))?;

    let https = HttpsConnectorBuilder::new()
        .with_native_roots()
        .map_err(|e| GcalServiceError::AuthSetup(format!("no native TLS roots: {}", e)))?
        .https_or_http()
        .enable_http1()
        .build();

    // Create client without specifying body type
    let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(https);

    let hub = CalendarHub::new(client, auth);

    Ok(hub)
}
