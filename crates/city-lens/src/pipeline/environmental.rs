use tracing::warn;

use super::domain::{round1, AirQualityLevel, EnvironmentalResult, ProjectInput};
use super::signals::AirQualitySignal;

/// Derives air-quality, noise, heat-island, and runoff estimates from the
/// congestion score and an optional measured baseline.
pub struct EnvironmentalScorer;

impl EnvironmentalScorer {
    /// Never fails: a corrupt baseline degrades to the formula-only path.
    pub fn derive(
        congestion_score: f64,
        project: &ProjectInput,
        air: Option<&AirQualitySignal>,
    ) -> EnvironmentalResult {
        let baseline = match air {
            Some(signal) if signal.aqi.is_finite() => Some(signal),
            Some(signal) => {
                warn!(aqi = signal.aqi, "discarding corrupt air-quality baseline");
                None
            }
            None => None,
        };

        let aqi = match baseline {
            Some(signal) => signal.aqi + congestion_score * 30.0,
            None => 50.0 + congestion_score * 150.0,
        };
        let aqi = aqi.min(300.0);

        let noise = match baseline.and_then(|signal| signal.noise_db) {
            Some(noise_baseline) if noise_baseline.is_finite() => {
                noise_baseline + congestion_score * 15.0
            }
            _ => 55.0 + congestion_score * 30.0,
        };
        let noise = noise.min(85.0);

        // Only the increment over ambient temperature is reported, so the
        // measured-baseline path reduces to the same delta.
        let heat_island = congestion_score * 3.0;

        let mut runoff = congestion_score * 50.0;
        if let Some(green) = project.green_space_percent {
            runoff *= 1.0 - green / 100.0;
        }

        let pm25 = baseline.and_then(|signal| signal.pm25).unwrap_or(15.0);
        let pm10 = baseline.and_then(|signal| signal.pm10).unwrap_or(25.0);

        EnvironmentalResult {
            air_quality_index: round1(aqi),
            air_quality_level: AirQualityLevel::from_index(aqi),
            pm25: round1(pm25),
            pm10: round1(pm10),
            noise_level_db: round1(noise),
            heat_island_effect_c: round1(heat_island),
            stormwater_runoff_increase: round1(runoff),
            used_air_quality_baseline: baseline.is_some(),
        }
    }
}
