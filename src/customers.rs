use crate::client::{ApiConnector, CustomerApiClient};
use crate::errors::{error_for_status, parse_error_response, ApiError};
use crate::models::customer::{
    CreateCustomerRequest, CustomerInstance, CustomerList, InstanceStatus, UpdateCustomerRequest,
};
use crate::models::outcome::{ApiOutcome, ReadyOutcome};
use crate::models::response::{ApiResponse, HealthResponse};
use log::debug;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tokio::time::sleep;

const CUSTOMERS_PATH: &str = "/api/v1/customers";

fn customer_path(name: &str) -> String {
    format!("{}/{}", CUSTOMERS_PATH, name)
}

/// Reads the `data` of a successful response; 404 becomes `ApiOutcome::NotFound`.
async fn read_outcome<T>(response: Response) -> Result<ApiOutcome<T>, ApiError>
where
    T: DeserializeOwned,
{
    if response.status() == StatusCode::NOT_FOUND {
        return Ok(ApiOutcome::NotFound);
    }
    let response = error_for_status(response).await?;
    read_data(response).await.map(ApiOutcome::Found)
}

async fn read_data<T>(response: Response) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let status = response.status();
    let body = response.text().await?;
    debug!("{} response body: {}", status, body);
    let envelope: ApiResponse<T> = serde_json::from_str(&body)?;
    envelope
        .data
        .ok_or_else(|| ApiError::JsonError(serde::de::Error::missing_field("data")))
}

/// Checks that the API server is up.
///
/// # Performed API Request
///
/// ```
/// GET {api_url}/health
/// ```
pub async fn health_check(client: &CustomerApiClient) -> Result<HealthResponse, ApiError> {
    let response = client
        .perform_request(Method::GET, "/health", None::<()>, None)
        .await?;
    let response = error_for_status(response).await?;
    Ok(response.json::<HealthResponse>().await?)
}

/// Creates a new customer instance.
///
/// A validation failure (HTTP 400) is returned as `ApiOutcome::Invalid`.
///
/// # Arguments
///
/// * `client` - A reference to a CustomerApiClient instance
/// * `request` - The complete create payload
///
/// # Performed API Request
///
/// ```
/// POST {api_url}/api/v1/customers
/// ```
pub async fn create_customer(
    client: &CustomerApiClient,
    request: &CreateCustomerRequest,
) -> Result<ApiOutcome<CustomerInstance>, ApiError> {
    let response = client
        .perform_request(Method::POST, CUSTOMERS_PATH, Some(request), None)
        .await?;

    if response.status() == StatusCode::BAD_REQUEST {
        let body = response.text().await?;
        return Ok(ApiOutcome::Invalid(parse_error_response(&body)));
    }

    let response = error_for_status(response).await?;
    read_data(response).await.map(ApiOutcome::Found)
}

/// Retrieves a single customer instance.
///
/// # Arguments
///
/// * `client` - A reference to a CustomerApiClient instance
/// * `name` - Unique name of the customer instance
///
/// # Performed API Request
///
/// ```
/// GET {api_url}/api/v1/customers/{name}
/// ```
pub async fn get_customer(
    client: &CustomerApiClient,
    name: &str,
) -> Result<ApiOutcome<CustomerInstance>, ApiError> {
    let response = client
        .perform_request(Method::GET, &customer_path(name), None::<()>, None)
        .await?;
    read_outcome(response).await
}

/// Retrieves one page of customer instances.
///
/// # Arguments
///
/// * `client` - A reference to a CustomerApiClient instance
/// * `page` - 1-based page number
/// * `page_size` - Number of customers per page
///
/// # Performed API Request
///
/// ```
/// GET {api_url}/api/v1/customers?page={page}&pageSize={page_size}
/// ```
pub async fn list_customers(
    client: &CustomerApiClient,
    page: u32,
    page_size: u32,
) -> Result<CustomerList, ApiError> {
    let query_parameters = vec![("page", page.to_string()), ("pageSize", page_size.to_string())];
    let response = client
        .perform_request(
            Method::GET,
            CUSTOMERS_PATH,
            None::<()>,
            Some(query_parameters),
        )
        .await?;
    let response = error_for_status(response).await?;
    read_data(response).await
}

/// Updates the fields of a customer instance that are set in `updates`.
///
/// # Performed API Request
///
/// ```
/// PUT {api_url}/api/v1/customers/{name}
/// ```
pub async fn update_customer(
    client: &CustomerApiClient,
    name: &str,
    updates: &UpdateCustomerRequest,
) -> Result<ApiOutcome<CustomerInstance>, ApiError> {
    let response = client
        .perform_request(Method::PUT, &customer_path(name), Some(updates), None)
        .await?;
    read_outcome(response).await
}

/// Deletes a customer instance and returns the API's confirmation message.
///
/// # Performed API Request
///
/// ```
/// DELETE {api_url}/api/v1/customers/{name}
/// ```
pub async fn delete_customer(
    client: &CustomerApiClient,
    name: &str,
) -> Result<ApiOutcome<String>, ApiError> {
    let response = client
        .perform_request(Method::DELETE, &customer_path(name), None::<()>, None)
        .await?;
    if response.status() == StatusCode::NOT_FOUND {
        return Ok(ApiOutcome::NotFound);
    }
    let response = error_for_status(response).await?;
    let envelope: ApiResponse<serde_json::Value> = response.json().await?;
    Ok(ApiOutcome::Found(envelope.message.unwrap_or_default()))
}

/// Retrieves the status of a customer instance.
///
/// # Performed API Request
///
/// ```
/// GET {api_url}/api/v1/customers/{name}/status
/// ```
pub async fn get_customer_status(
    client: &CustomerApiClient,
    name: &str,
) -> Result<ApiOutcome<InstanceStatus>, ApiError> {
    let request_path = format!("{}/status", customer_path(name));
    let response = client
        .perform_request(Method::GET, &request_path, None::<()>, None)
        .await?;
    read_outcome(response).await
}

/// Polls the status of a customer instance until it is ready.
///
/// Polling stops as soon as the instance is ready, has failed or is gone. Otherwise the
/// status is polled every `client.poll_interval` until `timeout` has elapsed, at most
/// `timeout / poll_interval` times.
///
/// # Arguments
///
/// * `client` - A reference to a CustomerApiClient instance
/// * `name` - Unique name of the customer instance
/// * `timeout` - Maximum time to wait
pub async fn wait_for_ready(
    client: &CustomerApiClient,
    name: &str,
    timeout: Duration,
) -> Result<ReadyOutcome, ApiError> {
    let start = Instant::now();
    let max_polls = if client.poll_interval.is_zero() {
        u128::MAX
    } else {
        timeout.as_nanos() / client.poll_interval.as_nanos()
    };
    let mut polls = 0;

    while polls < max_polls && start.elapsed() < timeout {
        polls += 1;
        debug!("status poll #{} for customer {}", polls, name);

        let status = match get_customer_status(client, name).await? {
            ApiOutcome::Found(status) => status,
            _ => {
                println!("❌ Customer {} not found", name);
                return Ok(ReadyOutcome::NotFound);
            }
        };

        println!("⏳ Customer {} status: {}", name, status.phase);

        if status.ready {
            println!("✅ Customer {} is ready!", name);
            return Ok(ReadyOutcome::Ready);
        }

        if status.is_failed() {
            let message = if status.message.is_empty() {
                "Unknown error".to_string()
            } else {
                status.message
            };
            println!("❌ Customer {} failed: {}", name, message);
            return Ok(ReadyOutcome::Failed(message));
        }

        if polls < max_polls {
            sleep(client.poll_interval).await;
        }
    }

    println!("⏰ Timeout waiting for customer {} to be ready", name);
    Ok(ReadyOutcome::TimedOut)
}
