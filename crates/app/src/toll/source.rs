//! Toll rates providers.

use std::{path::Path, time::Duration};

use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::{HatlightError, HatlightResult};

/// WSDOT toll rates endpoint.
pub const WSDOT_TOLL_URL: &str =
    "https://wsdot.wa.gov/Traffic/api/TollRates/TollRatesREST.svc/GetTollRatesAsJson";
/// Environment variable holding the WSDOT access code.
pub const TOKEN_ENV_VAR: &str = "WSDOT_API_TOKEN";
/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Current toll of a single trip as reported by WSDOT.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TollTripRecord {
    /// Trip identifier, like `405tp02898`.
    pub trip_name: String,
    /// Current toll in cents.
    pub current_toll: i64,
    #[serde(default)]
    pub start_location_name: Option<String>,
    #[serde(default)]
    pub end_location_name: Option<String>,
    #[serde(default)]
    pub state_route: Option<String>,
    #[serde(default)]
    pub travel_direction: Option<String>,
}

impl TollTripRecord {
    pub fn new(trip_name: impl Into<String>, current_toll: i64) -> Self {
        Self {
            trip_name: trip_name.into(),
            current_toll,
            start_location_name: None,
            end_location_name: None,
            state_route: None,
            travel_direction: None,
        }
    }
}

/// Source of the current toll rates.
pub trait TollRateSource {
    /// Returns the current tolls of all known trips.
    async fn toll_rates(&self) -> HatlightResult<Vec<TollTripRecord>>;
}

impl<T: ?Sized + TollRateSource> TollRateSource for &T {
    async fn toll_rates(&self) -> HatlightResult<Vec<TollTripRecord>> {
        T::toll_rates(self).await
    }
}

/// Decodes the WSDOT JSON payload.
pub fn decode_records(payload: &str) -> HatlightResult<Vec<TollTripRecord>> {
    serde_json::from_str(payload).map_err(HatlightError::decode)
}

/// WSDOT Traveler Information API client.
#[derive(Debug, Clone)]
pub struct WsdotClient {
    http: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

impl WsdotClient {
    /// Creates a new client.
    ///
    /// A missing token is only reported on the first request.
    pub fn new(token: Option<String>, timeout: Duration) -> HatlightResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(HatlightError::network)?;
        Ok(Self {
            http,
            endpoint: WSDOT_TOLL_URL.to_owned(),
            token,
        })
    }

    /// Creates a new client with the token taken from the `WSDOT_API_TOKEN` variable.
    pub fn from_env(timeout: Duration) -> HatlightResult<Self> {
        Self::new(std::env::var(TOKEN_ENV_VAR).ok(), timeout)
    }

    /// Replaces the API endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn token(&self) -> HatlightResult<&str> {
        self.token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or(HatlightError::MissingCredential)
    }
}

impl TollRateSource for WsdotClient {
    async fn toll_rates(&self) -> HatlightResult<Vec<TollTripRecord>> {
        let token = self.token()?;

        log::debug!("Requesting toll rates from {}", self.endpoint);
        // Errors carry the request URL which contains the access code.
        let network = |err: reqwest::Error| HatlightError::network(err.without_url());
        let payload = self
            .http
            .get(&self.endpoint)
            .query(&[("AccessCode", token)])
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(network)?
            .error_for_status()
            .map_err(network)?
            .text()
            .await
            .map_err(network)?;

        decode_records(&payload)
    }
}

/// Fixed set of toll records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticRates {
    pub records: Vec<TollTripRecord>,
}

impl StaticRates {
    pub fn new(records: Vec<TollTripRecord>) -> Self {
        Self { records }
    }

    /// Reads records from a file with the WSDOT JSON payload.
    pub fn from_file<P: AsRef<Path>>(path: P) -> HatlightResult<Self> {
        let payload = std::fs::read_to_string(path).map_err(HatlightError::decode)?;
        decode_records(&payload).map(Self::new)
    }
}

impl TollRateSource for StaticRates {
    async fn toll_rates(&self) -> HatlightResult<Vec<TollTripRecord>> {
        Ok(self.records.clone())
    }
}
