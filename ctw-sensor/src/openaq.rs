//! OpenAQ v3 client: latest readings for every station in the monitored city.
//!
//! The fetch runs in two steps. Stations within a radius of the city centre
//! are listed first and filtered by city name, then each surviving station's
//! `/latest` endpoint is requested concurrently. The CO channel becomes the
//! reading's `value` and the PM2.5 channel becomes its `aqi`.
//!
//! # Failure policy
//!
//! - No API key: no request is made and the result is empty.
//! - A non-success `/latest` response skips that station only.
//! - A non-success station listing, a transport error or an undecodable body
//!   aborts the whole call.
//! - Nothing is retried.

use crate::error::{Result, SensorError};
use crate::reading::SensorReading;
use crate::transport::Transport;
use futures::future::join_all;
use log::{debug, error, info, warn};
use serde::Deserialize;

/// Historical sensor id used as the CO channel when a station lists no sensors.
pub const FALLBACK_CO_SENSOR_ID: u64 = 15259;
/// Historical sensor id used as the PM2.5 channel when a station lists no sensors.
pub const FALLBACK_PM25_SENSOR_ID: u64 = 14908;

const CO_PARAMETER: &str = "co";
const PM25_PARAMETER: &str = "pm25";

/// Connection and query settings for the OpenAQ client.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAqConfig {
    /// Versioned API root, without a trailing slash
    pub base_url: String,
    pub api_key: Option<String>,
    /// Case-insensitive substring a station's city or name must contain
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Search radius in meters
    pub radius_m: u32,
    /// Channel ids used when a station carries no sensor metadata
    pub fallback_channels: ChannelIds,
}

impl Default for OpenAqConfig {
    fn default() -> Self {
        OpenAqConfig {
            base_url: "https://api.openaq.org/v3".to_string(),
            api_key: None,
            city: "Nagpur".to_string(),
            latitude: 21.1458,
            longitude: 79.0882,
            radius_m: 25_000,
            fallback_channels: ChannelIds {
                co: FALLBACK_CO_SENSOR_ID,
                pm25: FALLBACK_PM25_SENSOR_ID,
            },
        }
    }
}

impl OpenAqConfig {
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let key = api_key.into();
        self.api_key = if key.trim().is_empty() { None } else { Some(key) };
        self
    }

    pub fn locations_url(&self) -> String {
        format!(
            "{}/locations?coordinates={},{}&radius={}",
            self.base_url, self.latitude, self.longitude, self.radius_m
        )
    }

    pub fn latest_url(&self, location_id: u64) -> String {
        format!("{}/locations/{}/latest", self.base_url, location_id)
    }
}

/// The sensor ids carrying the CO and PM2.5 channels of one station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelIds {
    pub co: u64,
    pub pm25: u64,
}

#[derive(Debug, Deserialize)]
struct LocationsResponse {
    #[serde(default)]
    results: Vec<Location>,
}

#[derive(Debug, Clone, Deserialize)]
struct Location {
    id: u64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    locality: Option<String>,
    #[serde(default)]
    coordinates: Option<Coordinates>,
    #[serde(default)]
    sensors: Vec<LocationSensor>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct Coordinates {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct LocationSensor {
    id: u64,
    #[serde(default)]
    parameter: Option<Parameter>,
}

#[derive(Debug, Clone, Deserialize)]
struct Parameter {
    name: String,
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[serde(default)]
    results: Vec<LatestMeasurement>,
}

#[derive(Debug, Deserialize)]
struct LatestMeasurement {
    #[serde(rename = "sensorsId")]
    sensors_id: u64,
    #[serde(default)]
    value: Option<f64>,
}

impl Location {
    fn city_label(&self) -> Option<&str> {
        self.city.as_deref().or(self.locality.as_deref())
    }

    fn is_in_city(&self, city: &str) -> bool {
        let needle = city.to_lowercase();
        let matches = |field: Option<&str>| {
            field
                .map(|s| s.to_lowercase().contains(&needle))
                .unwrap_or(false)
        };
        matches(self.city_label()) || matches(self.name.as_deref())
    }

    /// Resolve the CO and PM2.5 sensor ids from the station's own sensor
    /// list, by parameter name; fall back per channel when absent.
    fn resolve_channels(&self, fallback: ChannelIds) -> ChannelIds {
        let find = |parameter: &str| {
            self.sensors.iter().find_map(|s| match &s.parameter {
                Some(p) if p.name.eq_ignore_ascii_case(parameter) => Some(s.id),
                _ => None,
            })
        };
        ChannelIds {
            co: find(CO_PARAMETER).unwrap_or(fallback.co),
            pm25: find(PM25_PARAMETER).unwrap_or(fallback.pm25),
        }
    }
}

impl LatestResponse {
    /// Latest value of one channel, zero when the channel is missing.
    fn channel_value(&self, sensor_id: u64) -> f64 {
        self.results
            .iter()
            .find(|m| m.sensors_id == sensor_id)
            .and_then(|m| m.value)
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }
}

/// OpenAQ client over any `Transport`.
pub struct OpenAqClient<T> {
    config: OpenAqConfig,
    transport: T,
}

impl<T: Transport> OpenAqClient<T> {
    pub fn new(config: OpenAqConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &OpenAqConfig {
        &self.config
    }

    /// Latest readings for the configured city, or an empty list on any
    /// whole-call failure (the failure is logged).
    pub async fn fetch_latest_for_city(&self) -> Vec<SensorReading> {
        match self.try_fetch_latest_for_city().await {
            Ok(readings) => readings,
            Err(SensorError::MissingApiKey) => {
                error!("OpenAQ API key is missing; no live readings fetched");
                Vec::new()
            }
            Err(e) => {
                error!("An error occurred during the OpenAQ fetch: {}", e);
                Vec::new()
            }
        }
    }

    /// Same as [`fetch_latest_for_city`](Self::fetch_latest_for_city) but
    /// surfaces the typed error instead of collapsing it.
    pub async fn try_fetch_latest_for_city(&self) -> Result<Vec<SensorReading>> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(SensorError::MissingApiKey)?;

        let url = self.config.locations_url();
        let response = self.transport.get(&url, api_key).await?;
        if !response.is_success() {
            warn!(
                "Failed to fetch locations from OpenAQ: {} {}",
                response.status, response.body
            );
            return Err(SensorError::BadStatus {
                status: response.status,
                url,
            });
        }
        let locations: LocationsResponse = serde_json::from_str(&response.body)?;
        let total = locations.results.len();

        let in_city: Vec<Location> = locations
            .results
            .into_iter()
            .filter(|l| l.is_in_city(&self.config.city))
            .collect();
        info!(
            "{} of {} OpenAQ stations are in {}",
            in_city.len(),
            total,
            self.config.city
        );

        let stations = join_all(
            in_city
                .iter()
                .map(|location| self.fetch_station(api_key, location)),
        )
        .await;

        let readings = stations
            .into_iter()
            .collect::<Result<Vec<Option<SensorReading>>>>()?
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();
        info!("Fetched {} live readings", readings.len());
        Ok(readings)
    }

    /// Fetch one station's latest measurements.
    ///
    /// `Ok(None)` means the station is skipped (non-success status or no
    /// measurements); `Err` aborts the whole fetch.
    async fn fetch_station(
        &self,
        api_key: &str,
        location: &Location,
    ) -> Result<Option<SensorReading>> {
        let url = self.config.latest_url(location.id);
        let response = self.transport.get(&url, api_key).await?;
        if !response.is_success() {
            warn!(
                "Failed to fetch latest data for location {}: {} {}",
                location.id, response.status, response.body
            );
            return Ok(None);
        }
        let latest: LatestResponse = serde_json::from_str(&response.body)?;
        debug!(
            "Latest data for location {}: {} measurements",
            location.id,
            latest.results.len()
        );
        if latest.results.is_empty() {
            return Ok(None);
        }

        let channels = location.resolve_channels(self.config.fallback_channels);
        let (lat, lon) = location
            .coordinates
            .map(|c| (c.latitude, c.longitude))
            .unwrap_or((0.0, 0.0));

        Ok(Some(SensorReading::new(
            location.id,
            lat,
            lon,
            latest.channel_value(channels.co),
            location.name.clone().unwrap_or_default(),
            location.city_label().unwrap_or_default(),
            latest.channel_value(channels.pm25),
            // OpenAQ carries no temperature channel
            0.0,
        )))
    }
}

#[cfg(feature = "api")]
impl OpenAqClient<crate::transport::ReqwestTransport> {
    /// Client over a fresh `reqwest::Client`.
    pub fn with_reqwest(config: OpenAqConfig, client: reqwest::Client) -> Self {
        Self::new(config, crate::transport::ReqwestTransport::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportResponse;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Scripted transport: canned responses per URL, optional per-URL delay,
    /// and a log of every requested URL.
    #[derive(Default)]
    struct ScriptedTransport {
        routes: HashMap<String, std::result::Result<TransportResponse, String>>,
        delays: HashMap<String, Duration>,
        calls: RefCell<Vec<String>>,
    }

    impl ScriptedTransport {
        fn ok(mut self, url: String, body: &str) -> Self {
            self.routes.insert(
                url,
                Ok(TransportResponse {
                    status: 200,
                    body: body.to_string(),
                }),
            );
            self
        }

        fn status(mut self, url: String, status: u16) -> Self {
            self.routes.insert(
                url,
                Ok(TransportResponse {
                    status,
                    body: "error".to_string(),
                }),
            );
            self
        }

        fn fail(mut self, url: String) -> Self {
            self.routes.insert(url, Err("connection reset".to_string()));
            self
        }

        fn delay(mut self, url: String, d: Duration) -> Self {
            self.delays.insert(url, d);
            self
        }

        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl Transport for ScriptedTransport {
        async fn get(&self, url: &str, api_key: &str) -> Result<TransportResponse> {
            assert_eq!(api_key, "test-key");
            self.calls.borrow_mut().push(url.to_string());
            if let Some(d) = self.delays.get(url) {
                tokio::time::sleep(*d).await;
            }
            match self.routes.get(url) {
                Some(Ok(r)) => Ok(r.clone()),
                Some(Err(e)) => Err(SensorError::Transport(e.clone())),
                None => Ok(TransportResponse {
                    status: 404,
                    body: String::new(),
                }),
            }
        }
    }

    fn config() -> OpenAqConfig {
        OpenAqConfig::default().with_api_key("test-key")
    }

    const LOCATIONS: &str = r#"{"results": [
        {"id": 101, "name": "Civil Lines, Nagpur - MPCB", "locality": "Nagpur",
         "coordinates": {"latitude": 21.15, "longitude": 79.07},
         "sensors": [
            {"id": 9001, "name": "co ppm", "parameter": {"name": "co", "units": "ppm"}},
            {"id": 9002, "name": "pm25 µg/m³", "parameter": {"name": "pm25", "units": "µg/m³"}}
         ]},
        {"id": 102, "name": "Wardha Road", "city": "Butibori",
         "coordinates": {"latitude": 20.95, "longitude": 78.95}},
        {"id": 103, "name": "Opp GPO", "city": "NAGPUR",
         "coordinates": {"latitude": 21.16, "longitude": 79.08}}
    ]}"#;

    #[tokio::test]
    async fn test_missing_api_key_makes_no_calls() {
        let transport = ScriptedTransport::default();
        let client = OpenAqClient::new(OpenAqConfig::default(), transport);
        let readings = client.fetch_latest_for_city().await;
        assert!(readings.is_empty());
        assert_eq!(client.transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_api_key_counts_as_missing() {
        let cfg = OpenAqConfig::default().with_api_key("   ");
        let client = OpenAqClient::new(cfg, ScriptedTransport::default());
        assert!(matches!(
            client.try_fetch_latest_for_city().await,
            Err(SensorError::MissingApiKey)
        ));
        assert_eq!(client.transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_filters_city_and_resolves_channels() {
        let cfg = config();
        let transport = ScriptedTransport::default()
            .ok(cfg.locations_url(), LOCATIONS)
            .ok(
                cfg.latest_url(101),
                r#"{"results": [{"sensorsId": 9001, "value": 812.5}, {"sensorsId": 9002, "value": 61.0}]}"#,
            )
            .ok(
                cfg.latest_url(103),
                r#"{"results": [{"sensorsId": 15259, "value": 640.0}]}"#,
            );
        let client = OpenAqClient::new(cfg.clone(), transport);
        let readings = client.fetch_latest_for_city().await;

        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].id, 101);
        assert_eq!(readings[0].value, 812.5);
        assert_eq!(readings[0].aqi, 61.0);
        assert_eq!(readings[0].zone, "Nagpur");
        assert_eq!(readings[0].temp, 0.0);
        // station 103 has no sensor metadata: fallback CO id, PM2.5 missing -> 0
        assert_eq!(readings[1].id, 103);
        assert_eq!(readings[1].value, 640.0);
        assert_eq!(readings[1].aqi, 0.0);
        assert_eq!(readings[1].location, "Opp GPO");

        // Butibori station never requested
        let calls = client.transport.calls.borrow();
        assert_eq!(calls.len(), 3);
        assert!(!calls.contains(&cfg.latest_url(102)));
    }

    #[tokio::test]
    async fn test_station_name_alone_matches_city() {
        let cfg = config();
        let locations = r#"{"results": [
            {"id": 104, "name": "Nagpur Airport",
             "coordinates": {"latitude": 21.09, "longitude": 79.05}},
            {"id": 105, "name": "Wardha Road",
             "coordinates": {"latitude": 20.95, "longitude": 78.95}}
        ]}"#;
        let transport = ScriptedTransport::default()
            .ok(cfg.locations_url(), locations)
            .ok(
                cfg.latest_url(104),
                r#"{"results": [{"sensorsId": 15259, "value": 705.0}, {"sensorsId": 14908, "value": 48.0}]}"#,
            );
        let client = OpenAqClient::new(cfg.clone(), transport);
        let readings = client.fetch_latest_for_city().await;

        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].id, 104);
        assert_eq!(readings[0].location, "Nagpur Airport");
        assert_eq!(readings[0].zone, "");
        assert_eq!(readings[0].value, 705.0);
        assert_eq!(readings[0].aqi, 48.0);
        assert!(!client.transport.calls.borrow().contains(&cfg.latest_url(105)));
    }

    #[tokio::test]
    async fn test_non_ok_station_is_skipped() {
        let cfg = config();
        let transport = ScriptedTransport::default()
            .ok(cfg.locations_url(), LOCATIONS)
            .status(cfg.latest_url(101), 500)
            .ok(
                cfg.latest_url(103),
                r#"{"results": [{"sensorsId": 14908, "value": 88.0}]}"#,
            );
        let client = OpenAqClient::new(cfg, transport);
        let readings = client.fetch_latest_for_city().await;
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].id, 103);
        assert_eq!(readings[0].aqi, 88.0);
    }

    #[tokio::test]
    async fn test_empty_latest_results_are_skipped() {
        let cfg = config();
        let transport = ScriptedTransport::default()
            .ok(cfg.locations_url(), LOCATIONS)
            .ok(cfg.latest_url(101), r#"{"results": []}"#)
            .ok(cfg.latest_url(103), r#"{"results": []}"#);
        let client = OpenAqClient::new(cfg, transport);
        assert!(client.fetch_latest_for_city().await.is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_aborts_whole_call() {
        let cfg = config();
        let transport = ScriptedTransport::default()
            .ok(cfg.locations_url(), LOCATIONS)
            .ok(
                cfg.latest_url(101),
                r#"{"results": [{"sensorsId": 9001, "value": 812.5}]}"#,
            )
            .fail(cfg.latest_url(103));
        let client = OpenAqClient::new(cfg, transport);
        assert!(client.fetch_latest_for_city().await.is_empty());
        assert!(matches!(
            client.try_fetch_latest_for_city().await,
            Err(SensorError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_bad_locations_status_yields_empty() {
        let cfg = config();
        let transport = ScriptedTransport::default().status(cfg.locations_url(), 401);
        let client = OpenAqClient::new(cfg, transport);
        assert!(client.fetch_latest_for_city().await.is_empty());
        assert_eq!(client.transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_malformed_body_yields_empty() {
        let cfg = config();
        let transport = ScriptedTransport::default().ok(cfg.locations_url(), "<html>");
        let client = OpenAqClient::new(cfg, transport);
        assert!(client.fetch_latest_for_city().await.is_empty());
    }

    #[tokio::test]
    async fn test_order_follows_locations_not_response_timing() {
        let cfg = config();
        let transport = ScriptedTransport::default()
            .ok(cfg.locations_url(), LOCATIONS)
            .ok(
                cfg.latest_url(101),
                r#"{"results": [{"sensorsId": 9001, "value": 1.0}]}"#,
            )
            .delay(cfg.latest_url(101), Duration::from_millis(30))
            .ok(
                cfg.latest_url(103),
                r#"{"results": [{"sensorsId": 15259, "value": 2.0}]}"#,
            );
        let client = OpenAqClient::new(cfg, transport);
        let ids: Vec<u64> = client
            .fetch_latest_for_city()
            .await
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![101, 103]);
    }

    #[test]
    fn test_urls() {
        let cfg = OpenAqConfig::default();
        assert_eq!(
            cfg.locations_url(),
            "https://api.openaq.org/v3/locations?coordinates=21.1458,79.0882&radius=25000"
        );
        assert_eq!(
            cfg.latest_url(42),
            "https://api.openaq.org/v3/locations/42/latest"
        );
    }
}
