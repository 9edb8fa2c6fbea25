use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{BillingDateEntry, MeterRecord};

const BILLING_DATES: &str = "/api/billing-dates";
const METER_EXCEPTIONS: &str = "/api/meter-exceptions";

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("backend returned {status} for {endpoint}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
    },
}

/// Query body for the meter-exceptions endpoint.
///
/// `start_target`/`end_target` are `"YYYY-MM-DD HH:mm"` strings covering the
/// two calendar days preceding the billing date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionQuery {
    pub billing_date: String,
    pub start_target: String,
    pub end_target: String,
}

/// The two calls the dashboard makes against the meter backend.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn billing_dates(&self) -> Result<Vec<BillingDateEntry>, ClientError>;

    async fn meter_exceptions(
        &self,
        query: &ExceptionQuery,
    ) -> Result<Vec<MeterRecord>, ClientError>;
}

/// reqwest-backed implementation of [`Backend`].
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}

#[async_trait::async_trait]
impl Backend for HttpBackend {
    async fn billing_dates(&self) -> Result<Vec<BillingDateEntry>, ClientError> {
        let response = self
            .client
            .get(self.url(BILLING_DATES))
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: BILLING_DATES,
                source: e,
            })?;

        if !response.status().is_success() {
            return Err(ClientError::Status {
                endpoint: BILLING_DATES,
                status: response.status(),
            });
        }

        response.json().await.map_err(|e| ClientError::Http {
            endpoint: BILLING_DATES,
            source: e,
        })
    }

    async fn meter_exceptions(
        &self,
        query: &ExceptionQuery,
    ) -> Result<Vec<MeterRecord>, ClientError> {
        let response = self
            .client
            .post(self.url(METER_EXCEPTIONS))
            .json(query)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: METER_EXCEPTIONS,
                source: e,
            })?;

        if !response.status().is_success() {
            return Err(ClientError::Status {
                endpoint: METER_EXCEPTIONS,
                status: response.status(),
            });
        }

        response.json().await.map_err(|e| ClientError::Http {
            endpoint: METER_EXCEPTIONS,
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_serializes_with_backend_field_names() {
        let query = ExceptionQuery {
            billing_date: "20260115".to_string(),
            start_target: "2026-01-13 00:00".to_string(),
            end_target: "2026-01-14 23:59".to_string(),
        };
        let json = serde_json::to_string(&query).unwrap();
        assert_eq!(
            json,
            r#"{"billingDate":"20260115","startTarget":"2026-01-13 00:00","endTarget":"2026-01-14 23:59"}"#
        );
    }

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let backend = HttpBackend::new("http://localhost:5000/", Duration::from_secs(5)).unwrap();
        assert_eq!(
            backend.url(BILLING_DATES),
            "http://localhost:5000/api/billing-dates"
        );
    }
}
