//! Blocking HTTP implementation of [`ListingsSource`].

use std::path::PathBuf;

use chrono::Utc;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde_json::Value;

use super::traits::ListingsSource;
use super::types::{CONNECT_ERROR_MESSAGE, FetchOutcome, REDIRECT_MESSAGE, TIMEOUT_MESSAGE};
use crate::config::ApiConfig;
use crate::snapshot::{save_snapshot, stamp_document};

/// Pulls the listings endpoint and writes the snapshot on success.
pub struct HttpFetcher {
    // Client construction can fail (TLS backend); that failure surfaces as a
    // NetworkError on fetch instead of at startup.
    client: Result<Client, String>,
    endpoint: String,
    api_key: Option<String>,
    key_header: String,
    limit: u32,
    convert: String,
    snapshot_path: PathBuf,
}

impl HttpFetcher {
    pub fn new(api: &ApiConfig, snapshot_path: impl Into<PathBuf>) -> Self {
        let client = Client::builder()
            .timeout(api.timeout())
            .redirect(reqwest::redirect::Policy::limited(api.max_redirects() as usize))
            .user_agent(concat!("cstats/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                tracing::error!(
                    event = "core.fetch.client_build_failed",
                    error = %e
                );
                e.to_string()
            });

        let api_key = api.api_key();
        if api_key.is_none() {
            tracing::warn!(
                event = "core.fetch.api_key_missing",
                "No API key configured - requests will likely be rejected"
            );
        }

        Self {
            client,
            endpoint: api.endpoint().to_string(),
            api_key,
            key_header: api.key_header().to_string(),
            limit: api.limit(),
            convert: api.convert(),
            snapshot_path: snapshot_path.into(),
        }
    }

    pub fn query_params(&self) -> [(&'static str, String); 3] {
        [
            ("start", "1".to_string()),
            ("limit", self.limit.to_string()),
            ("convert", self.convert.clone()),
        ]
    }

    fn persist(&self, mut document: Value) -> FetchOutcome {
        if let Err(e) = stamp_document(&mut document, Utc::now()) {
            return FetchOutcome::unexpected(e);
        }
        match save_snapshot(&self.snapshot_path, &document) {
            Ok(()) => FetchOutcome::Success,
            Err(e) => {
                tracing::error!(
                    event = "core.fetch.snapshot_write_failed",
                    path = %self.snapshot_path.display(),
                    error = %e
                );
                FetchOutcome::unexpected(e)
            }
        }
    }
}

/// Map a transport failure onto the closed outcome set.
fn classify_error(error: &reqwest::Error) -> FetchOutcome {
    let message = if error.is_connect() {
        CONNECT_ERROR_MESSAGE
    } else if error.is_timeout() {
        TIMEOUT_MESSAGE
    } else if error.is_redirect() {
        REDIRECT_MESSAGE
    } else {
        return FetchOutcome::unexpected(error);
    };

    FetchOutcome::NetworkError {
        message: message.to_string(),
    }
}

impl ListingsSource for HttpFetcher {
    fn fetch(&self) -> FetchOutcome {
        let client = match &self.client {
            Ok(client) => client,
            Err(e) => return FetchOutcome::unexpected(e),
        };

        tracing::info!(
            event = "core.fetch.request_started",
            endpoint = %self.endpoint,
            limit = self.limit,
            convert = %self.convert
        );

        let mut request = client
            .get(&self.endpoint)
            .query(&self.query_params())
            .header("Accepts", "application/json");
        if let Some(key) = &self.api_key {
            request = request.header(self.key_header.as_str(), key.as_str());
        }

        let response = match request.send() {
            Ok(response) => response,
            Err(e) => {
                let outcome = classify_error(&e);
                tracing::warn!(
                    event = "core.fetch.request_failed",
                    endpoint = %self.endpoint,
                    error = %e
                );
                return outcome;
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(
                event = "core.fetch.api_rejected",
                status = status.as_u16()
            );
            return FetchOutcome::ApiError {
                status: status.as_u16(),
            };
        }

        let document: Value = match response.json() {
            Ok(document) => document,
            Err(e) => {
                tracing::warn!(
                    event = "core.fetch.body_invalid",
                    error = %e
                );
                return classify_error(&e);
            }
        };

        let outcome = self.persist(document);
        if outcome.is_success() {
            tracing::info!(
                event = "core.fetch.completed",
                path = %self.snapshot_path.display()
            );
        }
        outcome
    }
}
