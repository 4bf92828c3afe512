use crate::config::ApiConfig;
use async_trait::async_trait;
use log::debug;
use reqwest::header::AUTHORIZATION;
use reqwest::{Error, Method, Response};
use serde::Serialize;
use std::time::Duration;

/// Interval between two status polls while waiting for a customer instance
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Model for the customer API client object
#[derive(Debug)]
pub struct CustomerApiClient {
    pub config: ApiConfig,
    pub client: reqwest::Client,
    pub poll_interval: Duration,
}

/// A generic HTTP interface that leverages `reqwest`.
#[async_trait]
pub trait ApiConnector {
    async fn perform_request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<T>,
        query: Option<Vec<(&str, String)>>,
    ) -> Result<Response, Error>
    where
        T: Serialize + Send;
}

#[async_trait]
impl ApiConnector for CustomerApiClient {
    /// Issues HTTP requests with the bearer token of the configured API key.
    ///
    /// # Arguments
    ///
    /// * `&self`
    /// * `method` - One of reqwest::Method (GET, POST, ...)
    /// * `path` - API path relative to the configured base URL, e.g. `/api/v1/customers`
    /// * `body` - Optional body to be sent as JSON
    /// * `query` - Optional query parameters
    async fn perform_request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<T>,
        query: Option<Vec<(&str, String)>>,
    ) -> Result<Response, Error>
    where
        T: Serialize + Send,
    {
        let url = self.config.url(path);
        debug!("{} {}", method, url);

        let mut req = self
            .client
            .request(method, &url)
            .header(AUTHORIZATION, &self.config.authorization_header);

        if let Some(params) = query {
            req = req.query(&params);
        }

        if let Some(b) = body {
            req = req.json(&b);
        }

        let response = req.send().await?;
        debug!("{} answered with {}", url, response.status());
        Ok(response)
    }
}

impl From<ApiConfig> for CustomerApiClient {
    fn from(config: ApiConfig) -> Self {
        CustomerApiClient {
            config,
            client: reqwest::Client::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}
