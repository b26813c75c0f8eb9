use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use clap::Args;

use city_lens::error::AppError;
use city_lens::pipeline::{
    ImpactPipeline, ImpactResult, ProjectCsvImporter, ProjectInput, ProjectType, SignalProvider,
};

use crate::infra::{default_scoring_config, AbsentSignalProvider, StaticSignalProvider};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Project type: commercial, residential, mixed_use, or industrial
    #[arg(long, value_parser = crate::infra::parse_project_type, required_unless_present = "projects_csv")]
    pub(crate) project_type: Option<ProjectType>,
    /// Gross floor area in square feet
    #[arg(long, required_unless_present = "projects_csv")]
    pub(crate) size_sqft: Option<f64>,
    /// Site latitude in decimal degrees
    #[arg(long, required_unless_present = "projects_csv")]
    pub(crate) latitude: Option<f64>,
    /// Site longitude in decimal degrees
    #[arg(long, required_unless_present = "projects_csv")]
    pub(crate) longitude: Option<f64>,
    /// City name, matched case-sensitively against the dense-city set
    #[arg(long, required_unless_present = "projects_csv")]
    pub(crate) city: Option<String>,
    /// Building height in feet
    #[arg(long)]
    pub(crate) height_ft: Option<f64>,
    #[arg(long)]
    pub(crate) parking_spaces: Option<u32>,
    #[arg(long)]
    pub(crate) green_space_percent: Option<f64>,
    /// Score every project row in a CSV batch instead of a single project
    #[arg(long)]
    pub(crate) projects_csv: Option<PathBuf>,
    /// Skip the signal fixtures and exercise the degraded path
    #[arg(long)]
    pub(crate) no_signals: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Run the sweep without signal fixtures (fully degraded mode)
    #[arg(long)]
    pub(crate) no_signals: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let projects = match &args.projects_csv {
        Some(path) => ProjectCsvImporter::from_path(path)?,
        None => vec![ProjectInput {
            project_type: args.project_type.expect("required by clap"),
            size_sqft: args.size_sqft.expect("required by clap"),
            latitude: args.latitude.expect("required by clap"),
            longitude: args.longitude.expect("required by clap"),
            city: args.city.clone().expect("required by clap"),
            height_ft: args.height_ft,
            parking_spaces: args.parking_spaces,
            green_space_percent: args.green_space_percent,
        }],
    };

    if args.no_signals {
        score_all(Arc::new(AbsentSignalProvider), &projects)
    } else {
        score_all(Arc::new(StaticSignalProvider), &projects)
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let projects = sample_projects();

    println!(
        "City Lens demo sweep ({}), {} signal fixtures",
        Local::now().date_naive(),
        if args.no_signals { "without" } else { "with" }
    );
    println!();

    if args.no_signals {
        score_all(Arc::new(AbsentSignalProvider), &projects)
    } else {
        score_all(Arc::new(StaticSignalProvider), &projects)
    }
}

fn score_all<P>(provider: Arc<P>, projects: &[ProjectInput]) -> Result<(), AppError>
where
    P: SignalProvider,
{
    let pipeline = ImpactPipeline::new(provider, default_scoring_config());
    for project in projects {
        let result = pipeline.run(project)?;
        render_assessment(project, &result);
    }
    Ok(())
}

fn render_assessment(project: &ProjectInput, result: &ImpactResult) {
    println!(
        "== {} | {:.0} sqft | {} ==",
        project.project_type.label(),
        project.size_sqft,
        project.city
    );

    let congestion = &result.congestion;
    println!(
        "congestion      {:.2} ({}), peak hours: {}",
        congestion.score,
        congestion.level.label(),
        congestion.peak_hours.join(", ")
    );
    for road in &congestion.affected_roads {
        println!(
            "                {} +{:.0}% at {:.1} mi",
            road.name, road.impact_percent, road.distance_miles
        );
    }
    println!("                {}", congestion.recommendation);

    let environmental = &result.environmental;
    println!(
        "environment     AQI {:.1} ({}), noise {:.1} dB, heat +{:.1} C, runoff +{:.1}%",
        environmental.air_quality_index,
        environmental.air_quality_level.label(),
        environmental.noise_level_db,
        environmental.heat_island_effect_c,
        environmental.stormwater_runoff_increase
    );

    let socioeconomic = &result.socioeconomic;
    println!(
        "socioeconomic   property value {:+.1}%, jobs {}+{}, population {:+}, gentrification {}",
        socioeconomic.property_value_change_percent,
        socioeconomic.jobs_created_construction,
        socioeconomic.jobs_created_permanent,
        socioeconomic.population_change,
        socioeconomic.gentrification_risk.label()
    );

    let infrastructure = &result.infrastructure;
    println!(
        "infrastructure  roads {:.1}% utilized ({} stress), transit +{:.1}%",
        infrastructure.road_capacity_utilization,
        infrastructure.stress_level.label(),
        infrastructure.transit_demand_increase
    );
    for recommendation in &infrastructure.recommendations {
        println!("                {recommendation}");
    }

    println!("unified impact  {}", result.unified_impact_score);
    println!();
}

fn sample_projects() -> Vec<ProjectInput> {
    vec![
        ProjectInput {
            project_type: ProjectType::Commercial,
            size_sqft: 120_000.0,
            latitude: 40.7128,
            longitude: -74.006,
            city: "New York".to_string(),
            height_ft: Some(320.0),
            parking_spaces: Some(600),
            green_space_percent: Some(10.0),
        },
        ProjectInput {
            project_type: ProjectType::Residential,
            size_sqft: 80_000.0,
            latitude: 41.59,
            longitude: -93.62,
            city: "Des Moines".to_string(),
            height_ft: Some(65.0),
            parking_spaces: Some(120),
            green_space_percent: Some(25.0),
        },
        ProjectInput {
            project_type: ProjectType::MixedUse,
            size_sqft: 95_000.0,
            latitude: 41.88,
            longitude: -87.63,
            city: "Chicago".to_string(),
            height_ft: None,
            parking_spaces: Some(250),
            green_space_percent: Some(15.0),
        },
        ProjectInput {
            project_type: ProjectType::Industrial,
            size_sqft: 150_000.0,
            latitude: 41.6,
            longitude: -87.34,
            city: "Gary".to_string(),
            height_ft: None,
            parking_spaces: Some(2000),
            green_space_percent: None,
        },
    ]
}
