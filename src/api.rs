//! API client for communicating with the investor-relations backend
//!
//! Provides blocking methods for fetching financial KPIs, the property
//! portfolio, public disclosures and for asking the IR assistant. Calls are
//! made from GPUI's background executor, never from the UI thread.

use crate::format::KpiValue;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Backend operations consumed by the views.
///
/// Implemented by [`IrClient`] for the live backend and by
/// [`crate::demo::DemoClient`] for offline use.
pub trait IrApi: Send + Sync {
    fn get_kpis(&self) -> Result<Vec<KpiPoint>, ApiError>;

    fn get_portfolio(&self) -> Result<Vec<PortfolioProperty>, ApiError>;

    fn get_disclosures(&self) -> Result<Vec<Disclosure>, ApiError>;

    fn ask_assistant(&self, question: &str) -> Result<AssistantResponse, ApiError>;
}

/// Shared handle used by every view.
pub type SharedApi = Arc<dyn IrApi>;

/// API client for the IR backend
#[derive(Clone)]
pub struct IrClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl IrClient {
    /// Create a client with a custom base URL and request timeout
    pub fn with_timeout(base_url: String, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        decode(response)
    }
}

impl IrApi for IrClient {
    fn get_kpis(&self) -> Result<Vec<KpiPoint>, ApiError> {
        self.get_json("kpis")
    }

    fn get_portfolio(&self) -> Result<Vec<PortfolioProperty>, ApiError> {
        self.get_json("portfolio")
    }

    fn get_disclosures(&self) -> Result<Vec<Disclosure>, ApiError> {
        self.get_json("kap")
    }

    fn ask_assistant(&self, question: &str) -> Result<AssistantResponse, ApiError> {
        let url = self.endpoint("assistant");
        tracing::debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .json(&AssistantRequest {
                question: question.to_string(),
            })
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        decode(response)
    }
}

fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::blocking::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().unwrap_or_default();
        return Err(ApiError::Server {
            status: status.as_u16(),
            message,
        });
    }

    response.json().map_err(|e| ApiError::Parse(e.to_string()))
}

/// API error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("could not parse response: {0}")]
    Parse(String),
}

// Request/Response types

#[derive(Debug, Serialize)]
pub struct AssistantRequest {
    pub question: String,
}

/// One reporting period's financials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiPoint {
    pub period: String,
    #[serde(default)]
    pub total_assets: Option<KpiValue>,
    #[serde(default)]
    pub equity: Option<KpiValue>,
    #[serde(default)]
    pub investment_properties: Option<KpiValue>,
    #[serde(default)]
    pub net_rental_income: Option<KpiValue>,
    #[serde(default)]
    pub net_profit: Option<KpiValue>,
}

/// One real-estate asset in the portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioProperty {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub rooms: Option<u32>,
    #[serde(default)]
    pub gross_area_sqm: Option<f64>,
    #[serde(default)]
    pub gla_sqm: Option<f64>,
    #[serde(default)]
    pub valuation_value_tl: Option<f64>,
    #[serde(default)]
    pub valuation_date: Option<String>,
}

/// Public disclosure published on KAP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disclosure {
    pub id: i64,
    pub company_code: String,
    pub kap_id: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub publish_datetime: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Disclosure cited by an assistant answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub publish_datetime: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Option<Vec<Source>>,
}

impl AssistantResponse {
    pub fn into_parts(self) -> (String, Vec<Source>) {
        (self.answer, self.sources.unwrap_or_default())
    }
}
