use super::domain::{round1, InfrastructureResult, ProjectInput, RiskLevel};

const ROAD_WIDENING: &str = "Road widening needed within 2 years";
const BUS_FREQUENCY: &str = "Increase bus frequency on nearby routes";
const WATER_MAINS: &str = "Upgrade water mains in this sector";
const SUBSTATION: &str = "Substation upgrade required";
const ADEQUATE: &str = "Current infrastructure adequate";

/// Pure derivation of capacity-stress metrics and maintenance
/// recommendations from the congestion score and project size.
pub struct InfrastructureScorer;

impl InfrastructureScorer {
    pub fn derive(congestion_score: f64, project: &ProjectInput) -> InfrastructureResult {
        let road_utilization = (65.0 + congestion_score * 35.0).min(100.0);
        let transit_demand = congestion_score * 40.0;
        let water_demand = (project.size_sqft / 100_000.0 * 15.0).min(100.0);
        let electricity_demand = (project.size_sqft / 100_000.0 * 25.0).min(150.0);

        let mut recommendations = Vec::new();
        if road_utilization > 85.0 {
            recommendations.push(ROAD_WIDENING);
        }
        if transit_demand > 25.0 {
            recommendations.push(BUS_FREQUENCY);
        }
        if water_demand > 50.0 {
            recommendations.push(WATER_MAINS);
        }
        if electricity_demand > 80.0 {
            recommendations.push(SUBSTATION);
        }
        if recommendations.is_empty() {
            recommendations.push(ADEQUATE);
        }

        let stress_level = if road_utilization > 85.0 {
            RiskLevel::High
        } else if road_utilization > 70.0 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        };

        InfrastructureResult {
            road_capacity_utilization: round1(road_utilization),
            transit_demand_increase: round1(transit_demand),
            water_demand_increase: round1(water_demand),
            electricity_demand_increase: round1(electricity_demand),
            recommendations,
            stress_level,
        }
    }
}
