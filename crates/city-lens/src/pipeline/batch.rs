use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{ProjectInput, ProjectType, ProjectValidationError};

#[derive(Debug)]
pub enum ProjectImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    UnknownProjectType { row: usize, found: String },
    Invalid { row: usize, source: ProjectValidationError },
}

impl std::fmt::Display for ProjectImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectImportError::Io(err) => write!(f, "failed to read project batch: {}", err),
            ProjectImportError::Csv(err) => write!(f, "invalid project CSV data: {}", err),
            ProjectImportError::UnknownProjectType { row, found } => {
                write!(f, "row {}: unknown project type '{}'", row, found)
            }
            ProjectImportError::Invalid { row, source } => {
                write!(f, "row {}: {}", row, source)
            }
        }
    }
}

impl std::error::Error for ProjectImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProjectImportError::Io(err) => Some(err),
            ProjectImportError::Csv(err) => Some(err),
            ProjectImportError::UnknownProjectType { .. } => None,
            ProjectImportError::Invalid { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for ProjectImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ProjectImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct ProjectRow {
    project_type: String,
    size_sqft: f64,
    latitude: f64,
    longitude: f64,
    city: String,
    #[serde(default)]
    height_ft: Option<f64>,
    #[serde(default)]
    parking_spaces: Option<u32>,
    #[serde(default)]
    green_space_percent: Option<f64>,
}

fn parse_project_type(value: &str) -> Option<ProjectType> {
    let normalized = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
    match normalized.as_str() {
        "commercial" => Some(ProjectType::Commercial),
        "residential" => Some(ProjectType::Residential),
        "mixed_use" => Some(ProjectType::MixedUse),
        "industrial" => Some(ProjectType::Industrial),
        _ => None,
    }
}

/// Reads a batch of project descriptions from CSV, validating each row
/// before it reaches the pipeline.
///
/// Expected header: `project_type,size_sqft,latitude,longitude,city,
/// height_ft,parking_spaces,green_space_percent`; the trailing three
/// columns may be blank.
pub struct ProjectCsvImporter;

impl ProjectCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ProjectInput>, ProjectImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ProjectInput>, ProjectImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut projects = Vec::new();
        for (index, record) in csv_reader.deserialize::<ProjectRow>().enumerate() {
            let row_number = index + 1;
            let row = record?;

            let project_type = parse_project_type(&row.project_type).ok_or_else(|| {
                ProjectImportError::UnknownProjectType {
                    row: row_number,
                    found: row.project_type.clone(),
                }
            })?;

            let project = ProjectInput {
                project_type,
                size_sqft: row.size_sqft,
                latitude: row.latitude,
                longitude: row.longitude,
                city: row.city,
                height_ft: row.height_ft,
                parking_spaces: row.parking_spaces,
                green_space_percent: row.green_space_percent,
            };

            project
                .validate()
                .map_err(|source| ProjectImportError::Invalid {
                    row: row_number,
                    source,
                })?;

            projects.push(project);
        }

        Ok(projects)
    }
}
