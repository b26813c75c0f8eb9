use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use city_lens::pipeline::{
    AirQualitySignal, CongestionLevel, NearbyRoad, ProjectType, RoadSignal, ScoringConfig,
    SignalError, SignalProvider, TrafficSignal,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-process provider serving fixed survey values for every location.
///
/// Stands in for the external traffic/road/air APIs; swapping in a real
/// client only requires another `SignalProvider` implementation.
#[derive(Default, Clone)]
pub(crate) struct StaticSignalProvider;

impl SignalProvider for StaticSignalProvider {
    fn fetch_traffic(&self, _lat: f64, _lon: f64) -> Result<Option<TrafficSignal>, SignalError> {
        Ok(Some(TrafficSignal {
            speed_mph: 35.0,
            congestion_level: CongestionLevel::Moderate,
        }))
    }

    fn fetch_road_network(&self, _lat: f64, _lon: f64) -> Result<Option<RoadSignal>, SignalError> {
        Ok(Some(RoadSignal {
            density: 0.52,
            nearby_roads: vec![
                NearbyRoad {
                    name: "Main Street".to_string(),
                    distance_miles: Some(0.2),
                },
                NearbyRoad {
                    name: "Broadway".to_string(),
                    distance_miles: Some(0.4),
                },
                NearbyRoad {
                    name: "Park Avenue".to_string(),
                    distance_miles: Some(0.6),
                },
            ],
        }))
    }

    fn fetch_air_quality(
        &self,
        _lat: f64,
        _lon: f64,
    ) -> Result<Option<AirQualitySignal>, SignalError> {
        Ok(Some(AirQualitySignal {
            aqi: 72.0,
            pm25: Some(21.6),
            pm10: Some(36.0),
            noise_db: None,
            temperature_c: None,
        }))
    }
}

/// Provider with no data for any location, forcing the pipeline's
/// degraded-mode paths end to end.
#[derive(Default, Clone)]
pub(crate) struct AbsentSignalProvider;

impl SignalProvider for AbsentSignalProvider {
    fn fetch_traffic(&self, _lat: f64, _lon: f64) -> Result<Option<TrafficSignal>, SignalError> {
        Ok(None)
    }

    fn fetch_road_network(&self, _lat: f64, _lon: f64) -> Result<Option<RoadSignal>, SignalError> {
        Ok(None)
    }

    fn fetch_air_quality(
        &self,
        _lat: f64,
        _lon: f64,
    ) -> Result<Option<AirQualitySignal>, SignalError> {
        Ok(None)
    }
}

pub(crate) fn default_scoring_config() -> ScoringConfig {
    ScoringConfig::default()
}

pub(crate) fn parse_project_type(raw: &str) -> Result<ProjectType, String> {
    let normalized = raw.trim().to_ascii_lowercase().replace([' ', '-'], "_");
    match normalized.as_str() {
        "commercial" => Ok(ProjectType::Commercial),
        "residential" => Ok(ProjectType::Residential),
        "mixed_use" => Ok(ProjectType::MixedUse),
        "industrial" => Ok(ProjectType::Industrial),
        _ => Err(format!(
            "unknown project type '{raw}' (expected commercial, residential, mixed_use, or industrial)"
        )),
    }
}
