use serde::Serialize;

pub const CONNECT_ERROR_MESSAGE: &str = "Network error. Please check your internet connection.";
pub const TIMEOUT_MESSAGE: &str = "The request timed out. Please try again later.";
pub const REDIRECT_MESSAGE: &str = "Too many redirects. Please check the URL.";

/// Result of a single listings pull.
///
/// `NetworkError` deliberately covers every failure that is not an HTTP
/// status: unreachable host, timeout, redirect loop, and any unexpected
/// failure while reading, parsing or persisting the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchOutcome {
    /// Response received and snapshot written.
    Success,
    /// The API answered with a non-200 status.
    ApiError { status: u16 },
    /// The API could not be reached, or the pull failed unexpectedly.
    NetworkError { message: String },
}

impl FetchOutcome {
    pub fn unexpected(cause: impl std::fmt::Display) -> Self {
        Self::NetworkError {
            message: format!("An error occurred: {}", cause),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}
