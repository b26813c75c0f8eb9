use serde::{Deserialize, Serialize};

/// Coarse congestion bucket reported by a traffic provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CongestionLevel {
    Free,
    Moderate,
    Heavy,
}

/// Real-time traffic observation near the project site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrafficSignal {
    pub speed_mph: f64,
    pub congestion_level: CongestionLevel,
}

/// One road segment near the project site. Distance may be unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyRoad {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,
}

/// Road-network snapshot around the project site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadSignal {
    pub density: f64,
    pub nearby_roads: Vec<NearbyRoad>,
}

/// Ambient air-quality baseline, with optional noise and temperature readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirQualitySignal {
    pub aqi: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm25: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pm10: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise_db: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
}

/// Everything the pipeline fetched for one request. Every field may be
/// absent; absence is the normal degraded-mode case, not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalBundle {
    pub traffic: Option<TrafficSignal>,
    pub road: Option<RoadSignal>,
    pub air_quality: Option<AirQualitySignal>,
}

impl SignalBundle {
    /// A bundle with every signal missing, for degraded-mode paths.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Provider-side failure. Distinct from `Ok(None)`, which means the provider
/// answered but has no data for the location. The pipeline absorbs both the
/// same way; the distinction exists for logging and provider diagnostics.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SignalError {
    #[error("signal fetch timed out after {waited_ms}ms")]
    Timeout { waited_ms: u64 },
    #[error("signal provider unavailable: {0}")]
    Unavailable(String),
}

/// Source of optional external measurements, keyed by coordinates.
///
/// Implementations must bound their own latency and return
/// [`SignalError::Timeout`] instead of blocking a request indefinitely.
pub trait SignalProvider: Send + Sync {
    fn fetch_traffic(&self, lat: f64, lon: f64) -> Result<Option<TrafficSignal>, SignalError>;

    fn fetch_road_network(&self, lat: f64, lon: f64) -> Result<Option<RoadSignal>, SignalError>;

    fn fetch_air_quality(&self, lat: f64, lon: f64)
        -> Result<Option<AirQualitySignal>, SignalError>;
}
