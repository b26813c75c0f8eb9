use serde::{Deserialize, Serialize};

/// Land-use classification for a proposed development.
///
/// The set is closed: unknown wire values are rejected during
/// deserialization, before any scorer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Commercial,
    Residential,
    MixedUse,
    Industrial,
}

impl ProjectType {
    pub const fn label(self) -> &'static str {
        match self {
            ProjectType::Commercial => "commercial",
            ProjectType::Residential => "residential",
            ProjectType::MixedUse => "mixed_use",
            ProjectType::Industrial => "industrial",
        }
    }
}

/// Caller-supplied description of the proposed project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInput {
    pub project_type: ProjectType,
    pub size_sqft: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_ft: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking_spaces: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub green_space_percent: Option<f64>,
}

impl ProjectInput {
    /// Boundary validation applied once per pipeline invocation. Scorers
    /// assume these invariants and never re-check them.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if !self.size_sqft.is_finite() || self.size_sqft <= 0.0 {
            return Err(ProjectValidationError::InvalidSize {
                found: self.size_sqft,
            });
        }

        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ProjectValidationError::LatitudeOutOfRange {
                found: self.latitude,
            });
        }

        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ProjectValidationError::LongitudeOutOfRange {
                found: self.longitude,
            });
        }

        if let Some(height) = self.height_ft {
            if !height.is_finite() || height <= 0.0 {
                return Err(ProjectValidationError::InvalidHeight { found: height });
            }
        }

        if let Some(green) = self.green_space_percent {
            if !(0.0..=100.0).contains(&green) {
                return Err(ProjectValidationError::GreenSpaceOutOfRange { found: green });
            }
        }

        Ok(())
    }
}

/// Validation errors surfaced to the caller before any scoring happens.
#[derive(Debug, thiserror::Error)]
pub enum ProjectValidationError {
    #[error("size_sqft must be a finite positive number (found {found})")]
    InvalidSize { found: f64 },
    #[error("latitude must be within [-90, 90] decimal degrees (found {found})")]
    LatitudeOutOfRange { found: f64 },
    #[error("longitude must be within [-180, 180] decimal degrees (found {found})")]
    LongitudeOutOfRange { found: f64 },
    #[error("height_ft must be a finite positive number when supplied (found {found})")]
    InvalidHeight { found: f64 },
    #[error("green_space_percent must be within [0, 100] when supplied (found {found})")]
    GreenSpaceOutOfRange { found: f64 },
}

/// Severity band shared by the congestion, gentrification, and
/// infrastructure classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Severe,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::Severe => "severe",
        }
    }

    /// Band a congestion score. Upper bounds are exclusive, so a score of
    /// exactly 0.6 lands in `High`.
    pub fn from_congestion_score(score: f64) -> Self {
        if score < 0.3 {
            RiskLevel::Low
        } else if score < 0.6 {
            RiskLevel::Moderate
        } else if score < 0.9 {
            RiskLevel::High
        } else {
            RiskLevel::Severe
        }
    }
}

/// One road in the projected impact radius.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AffectedRoad {
    pub name: String,
    pub impact_percent: f64,
    pub distance_miles: f64,
}

/// Which signal sources actually contributed to a congestion result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CongestionDataSources {
    pub traffic_api: bool,
    pub road_network: bool,
    pub fallback: bool,
}

/// Output of the congestion scorer; the downstream scorers consume `score`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CongestionResult {
    pub score: f64,
    pub level: RiskLevel,
    pub peak_hours: Vec<&'static str>,
    pub affected_roads: Vec<AffectedRoad>,
    pub recommendation: &'static str,
    pub data_sources: CongestionDataSources,
}

/// EPA-style air quality bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AirQualityLevel {
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Moderate")]
    Moderate,
    #[serde(rename = "Unhealthy for Sensitive Groups")]
    UnhealthySensitive,
    #[serde(rename = "Unhealthy")]
    Unhealthy,
    #[serde(rename = "Very Unhealthy")]
    VeryUnhealthy,
}

impl AirQualityLevel {
    pub const fn label(self) -> &'static str {
        match self {
            AirQualityLevel::Good => "Good",
            AirQualityLevel::Moderate => "Moderate",
            AirQualityLevel::UnhealthySensitive => "Unhealthy for Sensitive Groups",
            AirQualityLevel::Unhealthy => "Unhealthy",
            AirQualityLevel::VeryUnhealthy => "Very Unhealthy",
        }
    }

    pub fn from_index(aqi: f64) -> Self {
        if aqi < 50.0 {
            AirQualityLevel::Good
        } else if aqi < 100.0 {
            AirQualityLevel::Moderate
        } else if aqi < 150.0 {
            AirQualityLevel::UnhealthySensitive
        } else if aqi < 200.0 {
            AirQualityLevel::Unhealthy
        } else {
            AirQualityLevel::VeryUnhealthy
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentalResult {
    pub air_quality_index: f64,
    pub air_quality_level: AirQualityLevel,
    pub pm25: f64,
    pub pm10: f64,
    pub noise_level_db: f64,
    pub heat_island_effect_c: f64,
    pub stormwater_runoff_increase: f64,
    pub used_air_quality_baseline: bool,
}

/// Projected shift in resident age mix, in signed percentage points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemographicShift {
    pub young_adults_18_34: f64,
    pub families_35_54: f64,
    pub seniors_65_plus: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocioeconomicResult {
    pub property_value_change_percent: f64,
    pub jobs_created_construction: u32,
    pub jobs_created_permanent: u32,
    pub population_change: i64,
    pub gentrification_risk: RiskLevel,
    pub demographic_shift: DemographicShift,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfrastructureResult {
    pub road_capacity_utilization: f64,
    pub transit_demand_increase: f64,
    pub water_demand_increase: f64,
    pub electricity_demand_increase: f64,
    pub recommendations: Vec<&'static str>,
    pub stress_level: RiskLevel,
}

/// Unified assessment returned by the pipeline and served over HTTP.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImpactResult {
    pub congestion: CongestionResult,
    pub environmental: EnvironmentalResult,
    pub socioeconomic: SocioeconomicResult,
    pub infrastructure: InfrastructureResult,
    pub unified_impact_score: u32,
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> ProjectInput {
        ProjectInput {
            project_type: ProjectType::Commercial,
            size_sqft: 100_000.0,
            latitude: 41.59,
            longitude: -93.62,
            city: "Des Moines".to_string(),
            height_ft: None,
            parking_spaces: None,
            green_space_percent: None,
        }
    }

    #[test]
    fn validate_accepts_well_formed_input() {
        assert!(project().validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_positive_size() {
        let mut input = project();
        input.size_sqft = 0.0;
        assert!(matches!(
            input.validate(),
            Err(ProjectValidationError::InvalidSize { .. })
        ));

        input.size_sqft = f64::NAN;
        assert!(matches!(
            input.validate(),
            Err(ProjectValidationError::InvalidSize { .. })
        ));
    }

    #[test]
    fn validate_rejects_out_of_range_coordinates() {
        let mut input = project();
        input.latitude = 91.0;
        assert!(matches!(
            input.validate(),
            Err(ProjectValidationError::LatitudeOutOfRange { .. })
        ));

        let mut input = project();
        input.longitude = -200.0;
        assert!(matches!(
            input.validate(),
            Err(ProjectValidationError::LongitudeOutOfRange { .. })
        ));
    }

    #[test]
    fn validate_bounds_green_space_percent() {
        let mut input = project();
        input.green_space_percent = Some(100.0);
        assert!(input.validate().is_ok());

        input.green_space_percent = Some(100.1);
        assert!(matches!(
            input.validate(),
            Err(ProjectValidationError::GreenSpaceOutOfRange { .. })
        ));
    }

    #[test]
    fn unknown_project_type_is_rejected_at_deserialization() {
        let raw = r#"{
            "project_type": "stadium",
            "size_sqft": 1000.0,
            "latitude": 0.0,
            "longitude": 0.0,
            "city": "Springfield"
        }"#;
        assert!(serde_json::from_str::<ProjectInput>(raw).is_err());
    }

    #[test]
    fn congestion_band_boundaries_are_exclusive_at_the_top() {
        assert_eq!(RiskLevel::from_congestion_score(0.29), RiskLevel::Low);
        assert_eq!(RiskLevel::from_congestion_score(0.3), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_congestion_score(0.6), RiskLevel::High);
        assert_eq!(RiskLevel::from_congestion_score(0.9), RiskLevel::Severe);
        assert_eq!(RiskLevel::from_congestion_score(1.5), RiskLevel::Severe);
    }

    #[test]
    fn air_quality_bands_match_breakpoints() {
        assert_eq!(AirQualityLevel::from_index(49.9), AirQualityLevel::Good);
        assert_eq!(AirQualityLevel::from_index(50.0), AirQualityLevel::Moderate);
        assert_eq!(
            AirQualityLevel::from_index(100.0),
            AirQualityLevel::UnhealthySensitive
        );
        assert_eq!(AirQualityLevel::from_index(150.0), AirQualityLevel::Unhealthy);
        assert_eq!(
            AirQualityLevel::from_index(250.0),
            AirQualityLevel::VeryUnhealthy
        );
    }
}
