//! HTTP price feed for the monitored currency pair

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::config::FeedConfig;
use crate::error::MonitorResult;

/// A single price source attempt. Implementations make exactly one attempt per
/// call, do not retry, and report every problem as a `FetchFailure`.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch(&self) -> Result<f64, FetchFailure>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchFailure {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP error: {0}")]
    HttpStatus(u16),

    #[error("Malformed response body: {0}")]
    Malformed(String),

    #[error("Response has no 'result' field")]
    MissingResult,

    #[error("'result' is not a number: {0}")]
    NotNumeric(String),
}

impl FetchFailure {
    fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchFailure::Timeout(err.to_string())
        } else {
            FetchFailure::Network(err.to_string())
        }
    }
}

/// Extract the price from a `{ "result": <number> }` body
pub fn parse_price(body: &Value) -> Result<f64, FetchFailure> {
    let result = body.get("result").ok_or(FetchFailure::MissingResult)?;

    match result.as_f64() {
        Some(price) if price.is_finite() => Ok(price),
        _ => Err(FetchFailure::NotNumeric(result.to_string())),
    }
}

#[derive(Debug, Clone)]
pub struct HttpPriceFeed {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPriceFeed {
    pub fn new(settings: &FeedConfig) -> MonitorResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PriceSource for HttpPriceFeed {
    async fn fetch(&self) -> Result<f64, FetchFailure> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(FetchFailure::from_transport)?;

        if !response.status().is_success() {
            return Err(FetchFailure::HttpStatus(response.status().as_u16()));
        }

        let body: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                FetchFailure::Timeout(e.to_string())
            } else {
                FetchFailure::Malformed(e.to_string())
            }
        })?;

        parse_price(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_numeric_result() {
        assert_eq!(parse_price(&json!({"result": 2550})).unwrap(), 2550.0);
        assert_eq!(parse_price(&json!({"result": 2412.87, "success": true})).unwrap(), 2412.87);
    }

    #[test]
    fn test_parse_rejects_missing_and_non_numeric() {
        assert_eq!(parse_price(&json!({"rate": 1.0})), Err(FetchFailure::MissingResult));
        assert!(matches!(parse_price(&json!({"result": "2550"})), Err(FetchFailure::NotNumeric(_))));
        assert!(matches!(parse_price(&json!({"result": null})), Err(FetchFailure::NotNumeric(_))));
        assert_eq!(parse_price(&json!([1, 2])), Err(FetchFailure::MissingResult));
    }
}
