//! Deterministic impact-scoring pipeline.
//!
//! A project description plus optional external signals flows one way
//! through the calculators: congestion first, then the environmental,
//! socioeconomic, and infrastructure derivations, each consuming the
//! bounded congestion score. [`service::ImpactPipeline`] sequences the four
//! and applies result caching; [`router::impact_router`] exposes the single
//! `run` contract over HTTP.

pub mod batch;
pub mod cache;
pub mod congestion;
pub mod domain;
pub mod environmental;
pub mod infrastructure;
pub mod router;
pub mod service;
pub mod signals;
pub mod socioeconomic;

#[cfg(test)]
mod tests;

pub use batch::{ProjectCsvImporter, ProjectImportError};
pub use cache::ResultCache;
pub use congestion::{CongestionScorer, ScoringConfig};
pub use domain::{
    AffectedRoad, AirQualityLevel, CongestionDataSources, CongestionResult, DemographicShift,
    EnvironmentalResult, ImpactResult, InfrastructureResult, ProjectInput, ProjectType,
    ProjectValidationError, RiskLevel, SocioeconomicResult,
};
pub use environmental::EnvironmentalScorer;
pub use infrastructure::InfrastructureScorer;
pub use router::impact_router;
pub use service::{impact_cache_key, ImpactPipeline};
pub use signals::{
    AirQualitySignal, CongestionLevel, NearbyRoad, RoadSignal, SignalBundle, SignalError,
    SignalProvider, TrafficSignal,
};
pub use socioeconomic::SocioeconomicScorer;
