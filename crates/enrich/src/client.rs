use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::pipeline::Classifier;

const DEFAULT_AGIFY_URL: &str = "https://api.agify.io";
const DEFAULT_GENDERIZE_URL: &str = "https://api.genderize.io";
const DEFAULT_NATIONALIZE_URL: &str = "https://api.nationalize.io";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct DemographicsConfig {
    pub agify_url: String,
    pub genderize_url: String,
    pub nationalize_url: String,
    pub timeout_secs: u64,
}

impl DemographicsConfig {
    /// Load classifier endpoints from environment, falling back to the
    /// public APIs. Overriding the base URLs is mainly useful for
    /// pointing the service at stub servers.
    pub fn from_env() -> Self {
        Self {
            agify_url: env_or("AGIFY_BASE_URL", DEFAULT_AGIFY_URL),
            genderize_url: env_or("GENDERIZE_BASE_URL", DEFAULT_GENDERIZE_URL),
            nationalize_url: env_or("NATIONALIZE_BASE_URL", DEFAULT_NATIONALIZE_URL),
            timeout_secs: std::env::var("ENRICH_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Default for DemographicsConfig {
    fn default() -> Self {
        Self {
            agify_url: DEFAULT_AGIFY_URL.to_string(),
            genderize_url: DEFAULT_GENDERIZE_URL.to_string(),
            nationalize_url: DEFAULT_NATIONALIZE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("HTTP {status}: {body}")]
    HttpError { status: StatusCode, body: String },

    #[error("request failed: {0}")]
    RequestError(#[from] reqwest::Error),
}

// Wire shapes of the three public APIs. Each answers
// `GET {base}/?name=<name>` and returns null fields (or an empty
// country list) for names it has no data on.

#[derive(Debug, Deserialize)]
struct AgifyResponse {
    #[serde(default)]
    age: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct GenderizeResponse {
    #[serde(default)]
    gender: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NationalizeResponse {
    #[serde(default)]
    country: Vec<CountryEntry>,
}

#[derive(Debug, Deserialize)]
struct CountryEntry {
    country_id: String,
}

/// HTTP client for the agify / genderize / nationalize APIs.
///
/// Each lookup is a single attempt with a bounded timeout. Anything
/// other than a 2xx response with a decodable body is an error.
#[derive(Clone)]
pub struct DemographicsClient {
    client: Client,
    config: DemographicsConfig,
}

impl DemographicsClient {
    pub fn new(config: DemographicsConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        base_url: &str,
        name: &str,
    ) -> Result<T, ClassifyError> {
        let response = self
            .client
            .get(base_url)
            .query(&[("name", name)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifyError::HttpError { status, body });
        }

        response.json::<T>().await.map_err(ClassifyError::RequestError)
    }
}

#[async_trait]
impl Classifier for DemographicsClient {
    async fn age_for(&self, name: &str) -> Result<i32, ClassifyError> {
        let resp: AgifyResponse = self.fetch(&self.config.agify_url, name).await?;
        Ok(resp.age.unwrap_or(0))
    }

    async fn gender_for(&self, name: &str) -> Result<String, ClassifyError> {
        let resp: GenderizeResponse = self.fetch(&self.config.genderize_url, name).await?;
        Ok(resp.gender.unwrap_or_default())
    }

    async fn nationality_for(&self, name: &str) -> Result<String, ClassifyError> {
        let resp: NationalizeResponse = self.fetch(&self.config.nationalize_url, name).await?;
        Ok(resp
            .country
            .into_iter()
            .next()
            .map(|c| c.country_id)
            .unwrap_or_default())
    }
}
