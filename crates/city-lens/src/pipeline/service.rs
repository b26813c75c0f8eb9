use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::cache::ResultCache;
use super::congestion::{CongestionScorer, ScoringConfig};
use super::domain::{ImpactResult, ProjectInput, ProjectValidationError};
use super::environmental::EnvironmentalScorer;
use super::infrastructure::InfrastructureScorer;
use super::signals::{SignalBundle, SignalError, SignalProvider};
use super::socioeconomic::SocioeconomicScorer;

/// Orchestrates the four scorers over a signal provider, with write-through
/// caching of assembled results.
///
/// Stateless apart from the cache: every invocation recomputes from its
/// explicit inputs, so concurrent runs only contend on cache entries.
pub struct ImpactPipeline<P> {
    provider: Arc<P>,
    congestion: CongestionScorer,
    cache: ResultCache<ImpactResult>,
    result_ttl: Duration,
}

impl<P> ImpactPipeline<P>
where
    P: SignalProvider,
{
    pub fn new(provider: Arc<P>, config: ScoringConfig) -> Self {
        let result_ttl = config.result_ttl;
        Self {
            provider,
            congestion: CongestionScorer::new(config),
            cache: ResultCache::new(),
            result_ttl,
        }
    }

    /// Run the full assessment for one project.
    ///
    /// Only input validation can fail. Signal unavailability and scorer
    /// internal errors degrade to fallback calculations and are reported
    /// through the result's data-source flags instead of an error.
    pub fn run(&self, project: &ProjectInput) -> Result<ImpactResult, ProjectValidationError> {
        project.validate()?;

        let cache_key = impact_cache_key(project);
        if let Some(cached) = self.cache.get(&cache_key) {
            return Ok(cached);
        }

        let signals = self.fetch_bundle(project.latitude, project.longitude);
        let congestion = self.congestion.score(project, &signals);
        let environmental =
            EnvironmentalScorer::derive(congestion.score, project, signals.air_quality.as_ref());
        let socioeconomic = SocioeconomicScorer::derive(congestion.score, project);
        let infrastructure = InfrastructureScorer::derive(congestion.score, project);

        info!(
            city = %project.city,
            project_type = project.project_type.label(),
            score = congestion.score,
            level = congestion.level.label(),
            "impact assessment complete"
        );

        let unified_impact_score = (congestion.score * 100.0).round() as u32;
        let result = ImpactResult {
            congestion,
            environmental,
            socioeconomic,
            infrastructure,
            unified_impact_score,
        };

        self.cache.insert(cache_key, result.clone(), self.result_ttl);
        Ok(result)
    }

    fn fetch_bundle(&self, lat: f64, lon: f64) -> SignalBundle {
        SignalBundle {
            traffic: absorb("traffic", self.provider.fetch_traffic(lat, lon)),
            road: absorb("road_network", self.provider.fetch_road_network(lat, lon)),
            air_quality: absorb("air_quality", self.provider.fetch_air_quality(lat, lon)),
        }
    }
}

/// Provider failures are treated like absent data: logged, never surfaced.
fn absorb<T>(kind: &'static str, fetched: Result<Option<T>, SignalError>) -> Option<T> {
    match fetched {
        Ok(value) => value,
        Err(error) => {
            warn!(signal = kind, error = %error, "signal fetch failed, continuing without it");
            None
        }
    }
}

/// Deterministic cache key. Granularity is deliberately (lat, lon, type):
/// projects differing only in other attributes share an entry within the
/// TTL window.
pub fn impact_cache_key(project: &ProjectInput) -> String {
    format!(
        "impact_{}_{}_{}",
        project.latitude,
        project.longitude,
        project.project_type.label()
    )
}
