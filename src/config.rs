/// Default API location when neither `--api-url` nor `API_URL` is set
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Model for a connection configuration of the customer API
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Base URL without trailing slash
    pub api_url: String,
    /// Complete value of the `Authorization` header, i.e. `Bearer <api key>`
    pub authorization_header: String,
}

impl ApiConfig {
    /// Creates a new configuration from the API URL and API key.
    ///
    /// # Arguments
    ///
    /// * `api_url` - Base URL of the API server; trailing slashes are stripped
    /// * `api_key` - API key that is sent as bearer token
    pub fn new(api_url: &str, api_key: &str) -> Self {
        ApiConfig {
            api_url: api_url.trim_end_matches('/').to_string(),
            authorization_header: format!("Bearer {}", api_key),
        }
    }

    /// Returns the absolute URL of an API path like `/api/v1/customers`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}
