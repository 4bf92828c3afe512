use crate::models::response::ErrorResponse;

/// Result of an API call whose "expected" failures are not errors.
///
/// `NotFound` maps HTTP 404 and `Invalid` maps the validation failure the API returns with
/// HTTP 400. Everything else that goes wrong surfaces as an `ApiError`.
#[derive(Debug)]
pub enum ApiOutcome<T> {
    Found(T),
    NotFound,
    Invalid(ErrorResponse),
}

impl<T> ApiOutcome<T> {
    pub fn found(self) -> Option<T> {
        match self {
            ApiOutcome::Found(value) => Some(value),
            _ => None,
        }
    }
}

/// Terminal state of waiting for a customer instance to become ready
#[derive(Debug, PartialEq, Eq)]
pub enum ReadyOutcome {
    Ready,
    Failed(String),
    NotFound,
    TimedOut,
}
