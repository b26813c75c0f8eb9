use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::pipeline::congestion::ScoringConfig;
use crate::pipeline::domain::{ProjectInput, ProjectType};
use crate::pipeline::service::ImpactPipeline;
use crate::pipeline::signals::{
    AirQualitySignal, CongestionLevel, NearbyRoad, RoadSignal, SignalBundle, SignalError,
    SignalProvider, TrafficSignal,
};

pub(super) fn project(project_type: ProjectType, size_sqft: f64) -> ProjectInput {
    ProjectInput {
        project_type,
        size_sqft,
        latitude: 39.78,
        longitude: -89.65,
        city: "Springfield".to_string(),
        height_ft: None,
        parking_spaces: None,
        green_space_percent: None,
    }
}

pub(super) fn traffic(speed_mph: f64, congestion_level: CongestionLevel) -> TrafficSignal {
    TrafficSignal {
        speed_mph,
        congestion_level,
    }
}

pub(super) fn road_signal(density: f64) -> RoadSignal {
    RoadSignal {
        density,
        nearby_roads: vec![
            NearbyRoad {
                name: "5th Avenue".to_string(),
                distance_miles: Some(0.3),
            },
            NearbyRoad {
                name: "Oak Street".to_string(),
                distance_miles: None,
            },
        ],
    }
}

pub(super) fn air_signal(aqi: f64) -> AirQualitySignal {
    AirQualitySignal {
        aqi,
        pm25: Some(21.6),
        pm10: Some(36.0),
        noise_db: None,
        temperature_c: None,
    }
}

pub(super) fn no_signals() -> SignalBundle {
    SignalBundle::empty()
}

/// Provider returning the same fixture signals for every location.
pub(super) struct StaticProvider {
    pub(super) traffic: Option<TrafficSignal>,
    pub(super) road: Option<RoadSignal>,
    pub(super) air_quality: Option<AirQualitySignal>,
}

impl StaticProvider {
    pub(super) fn full() -> Self {
        Self {
            traffic: Some(traffic(35.0, CongestionLevel::Free)),
            road: Some(road_signal(0.4)),
            air_quality: Some(air_signal(72.0)),
        }
    }
}

impl SignalProvider for StaticProvider {
    fn fetch_traffic(&self, _lat: f64, _lon: f64) -> Result<Option<TrafficSignal>, SignalError> {
        Ok(self.traffic)
    }

    fn fetch_road_network(&self, _lat: f64, _lon: f64) -> Result<Option<RoadSignal>, SignalError> {
        Ok(self.road.clone())
    }

    fn fetch_air_quality(
        &self,
        _lat: f64,
        _lon: f64,
    ) -> Result<Option<AirQualitySignal>, SignalError> {
        Ok(self.air_quality)
    }
}

/// Provider with no data for any location: the expected degraded mode.
pub(super) struct AbsentProvider;

impl SignalProvider for AbsentProvider {
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

/// Provider that errors on every call, exercising the absorption path.
pub(super) struct FailingProvider;

impl SignalProvider for FailingProvider {
    fn fetch_traffic(&self, _lat: f64, _lon: f64) -> Result<Option<TrafficSignal>, SignalError> {
        Err(SignalError::Timeout { waited_ms: 2000 })
    }

    fn fetch_road_network(&self, _lat: f64, _lon: f64) -> Result<Option<RoadSignal>, SignalError> {
        Err(SignalError::Unavailable("traffic API offline".to_string()))
    }

    fn fetch_air_quality(
        &self,
        _lat: f64,
        _lon: f64,
    ) -> Result<Option<AirQualitySignal>, SignalError> {
        Err(SignalError::Unavailable("air API offline".to_string()))
    }
}

/// Counts fetches so cache behavior can be asserted.
#[derive(Default)]
pub(super) struct CountingProvider {
    pub(super) traffic_calls: AtomicUsize,
    pub(super) road_calls: AtomicUsize,
    pub(super) air_calls: AtomicUsize,
}

impl CountingProvider {
    pub(super) fn total_calls(&self) -> usize {
        self.traffic_calls.load(Ordering::Relaxed)
            + self.road_calls.load(Ordering::Relaxed)
            + self.air_calls.load(Ordering::Relaxed)
    }
}

impl SignalProvider for CountingProvider {
    fn fetch_traffic(&self, _lat: f64, _lon: f64) -> Result<Option<TrafficSignal>, SignalError> {
        self.traffic_calls.fetch_add(1, Ordering::Relaxed);
        Ok(None)
    }

    fn fetch_road_network(&self, _lat: f64, _lon: f64) -> Result<Option<RoadSignal>, SignalError> {
        self.road_calls.fetch_add(1, Ordering::Relaxed);
        Ok(None)
    }

    fn fetch_air_quality(
        &self,
        _lat: f64,
        _lon: f64,
    ) -> Result<Option<AirQualitySignal>, SignalError> {
        self.air_calls.fetch_add(1, Ordering::Relaxed);
        Ok(None)
    }
}

pub(super) fn build_pipeline<P: SignalProvider>(provider: Arc<P>) -> ImpactPipeline<P> {
    ImpactPipeline::new(provider, ScoringConfig::default())
}

pub(super) fn build_pipeline_with_ttl<P: SignalProvider>(
    provider: Arc<P>,
    result_ttl: Duration,
) -> ImpactPipeline<P> {
    let config = ScoringConfig {
        result_ttl,
        ..ScoringConfig::default()
    };
    ImpactPipeline::new(provider, config)
}
