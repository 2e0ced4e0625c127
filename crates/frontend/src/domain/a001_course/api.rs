//! Loader for the static catalog file.

use contracts::shared::{Catalog, LoadError};
use gloo_net::http::Request;

use crate::shared::config::SiteConfig;

/// Fetch and normalize `data.json`.
///
/// Transport failures and non-2xx responses are `LoadError::Network`;
/// a body that is not JSON is `LoadError::Parse`.
pub async fn fetch_catalog(config: &SiteConfig) -> Result<Catalog, LoadError> {
    log::debug!("fetching catalog from {}", config.data_url);
    let response = Request::get(&config.data_url)
        .send()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(LoadError::Network(format!(
            "HTTP {} {}",
            response.status(),
            response.status_text()
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;
    Catalog::from_json(&body, &config.course_page_dir)
}
