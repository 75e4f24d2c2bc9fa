use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::ser::{SerializeTuple, Serializer};

use crate::fetch::FetchOutcome;

pub const SUCCESS_MESSAGE: &str = "Data pulled from API";
pub const RATE_LIMITED_MESSAGE: &str = "API Hourly Pull Exceeded - Try Again Later";

/// Logical state of a refresh controller, for observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerState {
    Idle,
    Pulling,
    CoolingDown,
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ControllerState::Idle => "idle",
            ControllerState::Pulling => "pulling",
            ControllerState::CoolingDown => "cooling_down",
        };
        write!(f, "{}", label)
    }
}

/// Outcome of one refresh attempt.
///
/// Serializes to the caller-facing pair `[code, detail]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshStatus {
    Success,
    ApiError {
        status: u16,
    },
    NetworkError {
        message: String,
    },
    RateLimited {
        message: String,
        /// `None` when the next allowed instant is past the representable range.
        next_allowed: Option<DateTime<Utc>>,
    },
}

/// Second element of the `[code, detail]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StatusDetail {
    Status(u16),
    Message(String),
}

impl fmt::Display for StatusDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusDetail::Status(status) => write!(f, "{}", status),
            StatusDetail::Message(message) => write!(f, "{}", message),
        }
    }
}

impl RefreshStatus {
    pub fn rate_limited(next_allowed: Option<DateTime<Utc>>) -> Self {
        Self::RateLimited {
            message: RATE_LIMITED_MESSAGE.to_string(),
            next_allowed,
        }
    }

    /// Numeric status code: 0 success, 1 API error, 2 network error, 4 rate limited.
    pub fn code(&self) -> u8 {
        match self {
            RefreshStatus::Success => 0,
            RefreshStatus::ApiError { .. } => 1,
            RefreshStatus::NetworkError { .. } => 2,
            RefreshStatus::RateLimited { .. } => 4,
        }
    }

    pub fn detail(&self) -> StatusDetail {
        match self {
            RefreshStatus::Success => StatusDetail::Message(SUCCESS_MESSAGE.to_string()),
            RefreshStatus::ApiError { status } => StatusDetail::Status(*status),
            RefreshStatus::NetworkError { message } | RefreshStatus::RateLimited { message, .. } => {
                StatusDetail::Message(message.clone())
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RefreshStatus::Success => "success",
            RefreshStatus::ApiError { .. } => "api_error",
            RefreshStatus::NetworkError { .. } => "network_error",
            RefreshStatus::RateLimited { .. } => "rate_limited",
        }
    }

    /// True for outcomes where the pull itself went wrong.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            RefreshStatus::ApiError { .. } | RefreshStatus::NetworkError { .. }
        )
    }

    /// One-line text for a status bar.
    pub fn summary(&self) -> String {
        match self {
            RefreshStatus::Success => SUCCESS_MESSAGE.to_string(),
            RefreshStatus::ApiError { status } => format!("API Error: {}", status),
            RefreshStatus::NetworkError { message } => message.clone(),
            RefreshStatus::RateLimited {
                message,
                next_allowed: Some(next_allowed),
            } => format!(
                "{} (next pull after {})",
                message,
                next_allowed.format("%Y-%m-%d %H:%M:%S UTC")
            ),
            RefreshStatus::RateLimited {
                message,
                next_allowed: None,
            } => message.clone(),
        }
    }
}

impl From<FetchOutcome> for RefreshStatus {
    fn from(outcome: FetchOutcome) -> Self {
        match outcome {
            FetchOutcome::Success => RefreshStatus::Success,
            FetchOutcome::ApiError { status } => RefreshStatus::ApiError { status },
            FetchOutcome::NetworkError { message } => RefreshStatus::NetworkError { message },
        }
    }
}

impl Serialize for RefreshStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut pair = serializer.serialize_tuple(2)?;
        pair.serialize_element(&self.code())?;
        pair.serialize_element(&self.detail())?;
        pair.end()
    }
}
