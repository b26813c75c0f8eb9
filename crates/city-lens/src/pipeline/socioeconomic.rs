use super::domain::{
    round1, DemographicShift, ProjectInput, ProjectType, RiskLevel, SocioeconomicResult,
};

/// Pure derivation of property-value, employment, population, and
/// demographic effects. Deterministic given its inputs; no signal
/// dependency and no fallback path.
pub struct SocioeconomicScorer;

/// Step function over the congestion score: the first tier whose upper
/// bound exceeds the score wins, otherwise `above` applies.
struct PropertyValueRule {
    tiers: &'static [(f64, f64)],
    above: f64,
}

const fn property_value_rule(project_type: ProjectType) -> PropertyValueRule {
    match project_type {
        ProjectType::Commercial => PropertyValueRule {
            tiers: &[(0.5, 15.0), (0.8, 5.0)],
            above: -10.0,
        },
        ProjectType::Residential => PropertyValueRule {
            tiers: &[(0.4, 8.0), (0.7, 0.0)],
            above: -15.0,
        },
        ProjectType::MixedUse => PropertyValueRule {
            tiers: &[(0.5, 12.0), (0.75, 3.0)],
            above: -8.0,
        },
        ProjectType::Industrial => PropertyValueRule {
            tiers: &[(0.6, 5.0)],
            above: -5.0,
        },
    }
}

const fn jobs_per_sqft(project_type: ProjectType) -> f64 {
    match project_type {
        ProjectType::Commercial => 0.005,
        ProjectType::Residential => 0.001,
        ProjectType::MixedUse => 0.003,
        ProjectType::Industrial => 0.004,
    }
}

/// Baseline percentage and per-score slope for each age band.
struct DemographicRule {
    young_adults: (f64, f64),
    families: (f64, f64),
    seniors: (f64, f64),
}

const fn demographic_rule(project_type: ProjectType) -> DemographicRule {
    match project_type {
        ProjectType::Commercial => DemographicRule {
            young_adults: (15.0, 15.0),
            families: (10.0, -5.0),
            seniors: (5.0, -3.0),
        },
        ProjectType::Residential => DemographicRule {
            young_adults: (5.0, 5.0),
            families: (20.0, -5.0),
            seniors: (8.0, 2.0),
        },
        ProjectType::MixedUse | ProjectType::Industrial => DemographicRule {
            young_adults: (10.0, 10.0),
            families: (15.0, -5.0),
            seniors: (6.0, -1.0),
        },
    }
}

fn band(rule: (f64, f64), congestion_score: f64) -> f64 {
    let (baseline, slope) = rule;
    round1(baseline + slope * congestion_score)
}

impl SocioeconomicScorer {
    pub fn derive(congestion_score: f64, project: &ProjectInput) -> SocioeconomicResult {
        let rule = property_value_rule(project.project_type);
        let property_value_change = rule
            .tiers
            .iter()
            .find(|(limit, _)| congestion_score < *limit)
            .map(|(_, change)| *change)
            .unwrap_or(rule.above);

        let total_jobs = (project.size_sqft * jobs_per_sqft(project.project_type)) as u32;
        let construction_jobs = (f64::from(total_jobs) * 0.3) as u32;
        let permanent_jobs = total_jobs - construction_jobs;

        // Non-residential growth is induced household formation from the
        // permanent positions.
        let population_change = match project.project_type {
            ProjectType::Residential => (project.size_sqft * 0.002) as i64,
            _ => (f64::from(permanent_jobs) * 0.4) as i64,
        };

        let gentrification_risk = if congestion_score > 0.7
            && project.project_type == ProjectType::Commercial
        {
            RiskLevel::High
        } else if congestion_score > 0.5 || project.project_type == ProjectType::MixedUse {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        };

        let demographics = demographic_rule(project.project_type);

        SocioeconomicResult {
            property_value_change_percent: round1(property_value_change),
            jobs_created_construction: construction_jobs,
            jobs_created_permanent: permanent_jobs,
            population_change,
            gentrification_risk,
            demographic_shift: DemographicShift {
                young_adults_18_34: band(demographics.young_adults, congestion_score),
                families_35_54: band(demographics.families, congestion_score),
                seniors_65_plus: band(demographics.seniors, congestion_score),
            },
        }
    }
}
