use std::time::Duration;

use tracing::{debug, warn};

use super::domain::{
    round1, round2, AffectedRoad, CongestionDataSources, CongestionResult, ProjectInput,
    ProjectType, RiskLevel,
};
use super::signals::{CongestionLevel, RoadSignal, SignalBundle};

/// Policy dials for the scoring pipeline.
///
/// Constructed explicitly by the host and handed to the pipeline, so tests
/// and multiple pipeline instances can run with independent settings.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Case-sensitive city names that carry the fixed density multiplier.
    pub dense_cities: Vec<String>,
    /// How long a computed impact result stays valid in the cache.
    pub result_ttl: Duration,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            dense_cities: ["New York", "Mumbai", "Tokyo", "London", "Delhi", "Shanghai"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            result_ttl: Duration::from_secs(3600),
        }
    }
}

const fn base_score(project_type: ProjectType) -> f64 {
    match project_type {
        ProjectType::Commercial => 0.6,
        ProjectType::Residential => 0.4,
        ProjectType::MixedUse => 0.5,
        ProjectType::Industrial => 0.7,
    }
}

const fn peak_hours(project_type: ProjectType) -> &'static [&'static str] {
    match project_type {
        ProjectType::Commercial => &["7-9 AM", "12-2 PM", "5-7 PM"],
        ProjectType::Residential => &["6-8 AM", "5-8 PM"],
        ProjectType::MixedUse => &["7-9 AM", "12-2 PM", "5-8 PM"],
        ProjectType::Industrial => &["5-7 AM", "3-6 PM"],
    }
}

const FALLBACK_PEAK_HOURS: &[&str] = &["7-9 AM", "5-7 PM"];

const RECOMMENDATION_CRITICAL: &str = "CRITICAL: Add bus lanes immediately. Widen Main Street. Increase public transit frequency by 40%.";
const RECOMMENDATION_MODERATE: &str = "MODERATE: Optimize traffic signals at key intersections. Consider adding turn lanes. Monitor peak hours.";
const RECOMMENDATION_LOW: &str =
    "LOW IMPACT: Standard monitoring post-construction recommended. Add pedestrian crossings.";
const RECOMMENDATION_FALLBACK: &str = "Standard monitoring recommended";

fn recommendation(score: f64) -> &'static str {
    if score > 0.8 {
        RECOMMENDATION_CRITICAL
    } else if score > 0.5 {
        RECOMMENDATION_MODERATE
    } else {
        RECOMMENDATION_LOW
    }
}

/// Internal scoring failure. Expected missing signals never produce this;
/// it covers corrupt provider data that poisons the arithmetic.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ScoreError {
    #[error("non-finite intermediate score {score} at step '{step}'")]
    NonFinite { step: &'static str, score: f64 },
}

/// Composite congestion scorer. The most complex calculator; every
/// downstream scorer consumes its bounded score.
pub struct CongestionScorer {
    config: ScoringConfig,
}

impl CongestionScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Score a project. Never fails: an internal scoring error degrades to
    /// the reduced-input fallback calculation instead of propagating.
    pub fn score(&self, project: &ProjectInput, signals: &SignalBundle) -> CongestionResult {
        match self.full_score(project, signals) {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, "congestion scoring failed, using fallback calculation");
                self.fallback_score(project)
            }
        }
    }

    fn full_score(
        &self,
        project: &ProjectInput,
        signals: &SignalBundle,
    ) -> Result<CongestionResult, ScoreError> {
        let mut score = base_score(project.project_type);
        debug!(project_type = project.project_type.label(), score, "base score");

        // Speed and congestion level are independent triggers; only the
        // first matching tier applies.
        if let Some(traffic) = &signals.traffic {
            let factor = if traffic.speed_mph < 20.0
                || traffic.congestion_level == CongestionLevel::Heavy
            {
                1.3
            } else if traffic.speed_mph < 30.0
                || traffic.congestion_level == CongestionLevel::Moderate
            {
                1.1
            } else {
                1.0
            };
            score *= factor;
            debug!(speed_mph = traffic.speed_mph, factor, score, "traffic adjustment");
        }

        if let Some(road) = &signals.road {
            score *= 1.0 + road.density * 0.5;
            debug!(density = road.density, score, "road density adjustment");
        }

        let size_factor = (project.size_sqft / 100_000.0).min(2.0);
        score *= size_factor;

        if self.config.dense_cities.iter().any(|city| *city == project.city) {
            score *= 1.3;
            debug!(city = %project.city, score, "dense city adjustment");
        }

        if let Some(spaces) = project.parking_spaces.filter(|spaces| *spaces > 0) {
            let parking_factor = 1.0 + (f64::from(spaces) / 1000.0) * 0.15;
            score *= parking_factor.min(1.5);
        }

        if let Some(green) = project.green_space_percent.filter(|green| *green > 0.0) {
            let green_factor = 1.0 - (green / 100.0) * 0.4;
            score *= green_factor.max(0.6);
        }

        if !score.is_finite() {
            return Err(ScoreError::NonFinite {
                step: "composite",
                score,
            });
        }

        let score = round2(score.clamp(0.1, 1.5));
        let level = RiskLevel::from_congestion_score(score);

        let affected_roads = match &signals.road {
            Some(road) => roads_from_signal(road),
            None => mock_affected_roads(),
        };

        Ok(CongestionResult {
            score,
            level,
            peak_hours: peak_hours(project.project_type).to_vec(),
            affected_roads,
            recommendation: recommendation(score),
            data_sources: CongestionDataSources {
                traffic_api: signals.traffic.is_some(),
                road_network: signals.road.is_some(),
                fallback: false,
            },
        })
    }

    /// Reduced-input calculation for internal failures only. Expected
    /// missing-signal conditions are handled inline in `full_score`.
    fn fallback_score(&self, project: &ProjectInput) -> CongestionResult {
        let mut score = base_score(project.project_type);
        score *= (project.size_sqft / 100_000.0).min(2.0);

        if let Some(spaces) = project.parking_spaces.filter(|spaces| *spaces > 0) {
            score *= 1.0 + (f64::from(spaces) / 1000.0) * 0.15;
        }

        let score = round2(score.min(1.5));
        let level = RiskLevel::from_congestion_score(score);

        CongestionResult {
            score,
            level,
            peak_hours: FALLBACK_PEAK_HOURS.to_vec(),
            affected_roads: vec![AffectedRoad {
                name: "Main Street".to_string(),
                impact_percent: 35.0,
                distance_miles: 0.2,
            }],
            recommendation: RECOMMENDATION_FALLBACK,
            data_sources: CongestionDataSources {
                traffic_api: false,
                road_network: false,
                fallback: true,
            },
        }
    }
}

fn roads_from_signal(road: &RoadSignal) -> Vec<AffectedRoad> {
    road.nearby_roads
        .iter()
        .take(3)
        .enumerate()
        .map(|(index, nearby)| AffectedRoad {
            name: nearby.name.clone(),
            impact_percent: 30.0 + 15.0 * index as f64,
            distance_miles: round1(
                nearby
                    .distance_miles
                    .unwrap_or(0.5 + 0.3 * index as f64),
            ),
        })
        .collect()
}

fn mock_affected_roads() -> Vec<AffectedRoad> {
    vec![
        AffectedRoad {
            name: "Main Street".to_string(),
            impact_percent: 45.0,
            distance_miles: 0.2,
        },
        AffectedRoad {
            name: "Broadway".to_string(),
            impact_percent: 32.0,
            distance_miles: 0.4,
        },
        AffectedRoad {
            name: "Park Avenue".to_string(),
            impact_percent: 28.0,
            distance_miles: 0.6,
        },
    ]
}
