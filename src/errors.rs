use crate::models::response::{ApiResponse, ErrorResponse};
use colored::*;
use reqwest::{Response, StatusCode};

/// Failures that end a run of the CLI
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Error from reqwest: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Authentication failed")]
    Unauthorized,
    #[error("{0} {1}")]
    UnexpectedStatus(StatusCode, String),
}

impl ApiError {
    /// True if the API server could not be reached at all.
    pub fn is_connect(&self) -> bool {
        matches!(self, ApiError::RequestError(err) if err.is_connect())
    }
}

/// Turns any non-successful response into an `ApiError`, consuming its body.
///
/// # Arguments
///
/// * `response` - The response returned by the API
pub async fn error_for_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    let body = response.text().await?;
    Err(ApiError::UnexpectedStatus(status, body))
}

/// Extracts the error block from a failed response body.
///
/// Bodies that don't follow the API's envelope are wrapped as plain message.
pub fn parse_error_response(body: &str) -> ErrorResponse {
    match serde_json::from_str::<ApiResponse<serde_json::Value>>(body) {
        Ok(ApiResponse {
            error: Some(error), ..
        }) => error,
        _ => ErrorResponse {
            message: body.to_string(),
            ..Default::default()
        },
    }
}

/// Formats a validation failure with one line per failed field.
pub fn format_validation_failure(error: &ErrorResponse) -> String {
    let mut output = format!("❌ Validation failed: {}", error.message);
    for detail in &error.details {
        output.push_str(&format!("\n   {}: {}", detail.field, detail.message));
    }
    output
}

/// Prints an `ApiError` the way the CLI reports fatal failures.
///
/// # Arguments
///
/// * `error` - The error that ended the run
/// * `api_url` - URL of the API server, shown on connection failures
pub fn report_api_error(error: &ApiError, api_url: &str) {
    match error {
        err if err.is_connect() => {
            eprintln!(
                "{}",
                format!("❌ Failed to connect to API server at {}", api_url).red()
            );
            eprintln!("   Make sure the API server is running and accessible");
        }
        ApiError::Unauthorized => {
            eprintln!("{}", "❌ Authentication failed. Check your API key".red());
        }
        ApiError::UnexpectedStatus(status, body) => {
            eprintln!(
                "{}\n{}",
                format!("❌ API request failed: {}", status).red().bold(),
                body.magenta()
            );
        }
        err => {
            eprintln!("{} {}", "❌ Unexpected error:".red().bold(), err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::response::ValidationError;

    #[test]
    fn parses_enveloped_error() {
        let error = parse_error_response(
            r#"{"success":false,"error":{"code":"VALIDATION_FAILED","message":"Request validation failed","details":[{"field":"name","message":"Name is required"}]}}"#,
        );
        assert_eq!(error.code, "VALIDATION_FAILED");
        assert_eq!(error.details.len(), 1);
    }

    #[test]
    fn wraps_plain_body() {
        let error = parse_error_response("bad gateway");
        assert_eq!(error.message, "bad gateway");
        assert!(error.details.is_empty());
    }

    #[test]
    fn validation_failure_lists_every_field() {
        let error = ErrorResponse {
            code: "VALIDATION_FAILED".to_string(),
            message: "Request validation failed".to_string(),
            details: vec![
                ValidationError {
                    field: "name".to_string(),
                    message: "Name is required".to_string(),
                },
                ValidationError {
                    field: "imageTag".to_string(),
                    message: "Invalid tag".to_string(),
                },
            ],
        };

        assert_eq!(
            format_validation_failure(&error),
            "❌ Validation failed: Request validation failed\n   name: Name is required\n   imageTag: Invalid tag"
        );
    }

    #[test]
    fn unauthorized_is_not_a_connect_error() {
        assert!(!ApiError::Unauthorized.is_connect());
    }
}
