//! HTTP client for the public Makeup API.

mod aggregate;

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::CatalogError;
use crate::retry::RetryPolicy;
use crate::types::MakeupApiProduct;

/// HTTP client for the Makeup API list and by-id endpoints.
///
/// Maps 429, 404 and other non-2xx responses to typed errors. Rate limits and
/// network failures are retried per [`RetryPolicy`], honoring `Retry-After`.
pub struct MakeupClient {
    client: Client,
    /// API root without a trailing slash, e.g. `https://makeup-api.herokuapp.com/api/v1`.
    base_url: String,
    retry: RetryPolicy,
}

impl MakeupClient {
    /// Creates a client with the given timeout, `User-Agent` and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`CatalogError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, CatalogError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        Url::parse(&base_url).map_err(|e| CatalogError::InvalidBaseUrl {
            base_url: base_url.clone(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url,
            retry: RetryPolicy {
                max_retries,
                backoff_base: Duration::from_millis(backoff_base_ms),
            },
        })
    }

    /// Builds a client from the application config.
    ///
    /// # Errors
    ///
    /// See [`MakeupClient::new`].
    pub fn from_config(config: &glowcart_core::AppConfig) -> Result<Self, CatalogError> {
        Self::new(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_ms,
        )
    }

    /// Fetches the raw records for one `product_type` tag, optionally
    /// filtered server-side by a name substring.
    ///
    /// # Errors
    ///
    /// Propagates any [`CatalogError`] from the request.
    pub async fn fetch_raw_by_type(
        &self,
        product_type: &str,
        query: Option<&str>,
    ) -> Result<Vec<MakeupApiProduct>, CatalogError> {
        let url = self.products_url(product_type, query)?;
        self.get_json(url, &format!("products of type {product_type}"))
            .await
    }

    /// Fetches one raw record by its remote ID.
    ///
    /// # Errors
    ///
    /// [`CatalogError::NotFound`] on 404, otherwise any request error.
    pub async fn fetch_raw_by_id(&self, id: i64) -> Result<MakeupApiProduct, CatalogError> {
        let url = self.product_url(id)?;
        self.get_json(url, &format!("product {id}")).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, CatalogError> {
        self.retry.run(|| {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(url.clone())
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.trim().parse::<u64>().ok())
                        .unwrap_or(0);
                    return Err(CatalogError::RateLimited { retry_after_secs });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(CatalogError::NotFound {
                        url: url.to_string(),
                    });
                }

                if !status.is_success() {
                    return Err(CatalogError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<T>(&body).map_err(|e| CatalogError::Deserialize {
                    context: context.to_owned(),
                    source: e,
                })
            }
        })
        .await
    }

    /// Builds `{base}/products.json?product_type=..[&product_name=..]`.
    ///
    /// A blank query is omitted; a non-blank one is trimmed.
    fn products_url(&self, product_type: &str, query: Option<&str>) -> Result<Url, CatalogError> {
        let mut url = self.endpoint("products.json")?;
        url.query_pairs_mut()
            .append_pair("product_type", product_type);
        if let Some(q) = query.map(str::trim).filter(|q| !q.is_empty()) {
            url.query_pairs_mut().append_pair("product_name", q);
        }
        Ok(url)
    }

    fn product_url(&self, id: i64) -> Result<Url, CatalogError> {
        self.endpoint(&format!("products/{id}.json"))
    }

    fn endpoint(&self, path: &str) -> Result<Url, CatalogError> {
        let raw = format!("{}/{path}", self.base_url);
        Url::parse(&raw).map_err(|e| CatalogError::InvalidBaseUrl {
            base_url: self.base_url.clone(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
