use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::fetch::{full_name, FetchError, ProfileSource};
use crate::models::{EmployeeProfile, TrainingRecord};

/// Shape of a local employee export.
#[derive(Debug, Deserialize)]
struct EmployeeFile {
    #[serde(rename = "firstName")]
    first_name: Option<String>,
    #[serde(rename = "lastName")]
    last_name: Option<String>,
    #[serde(rename = "job title", default)]
    job_title: String,
    #[serde(default)]
    trainings: Vec<TrainingRecord>,
}

/// Reads the profile from a JSON file instead of the CV tool service.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ProfileSource for FileSource {
    async fn fetch_profile(&self, username: &str) -> Result<EmployeeProfile, FetchError> {
        info!(
            "Loading profile from {} (username '{}' ignored)",
            self.path.display(),
            username
        );

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FetchError::Io {
                path: self.path.clone(),
                source,
            })?;

        parse_employee_file(&raw)
    }
}

fn parse_employee_file(raw: &str) -> Result<EmployeeProfile, FetchError> {
    let file: EmployeeFile = serde_json::from_str(raw)?;

    let first_name = file.first_name.ok_or(FetchError::MissingField("firstName"))?;
    let last_name = file.last_name.ok_or(FetchError::MissingField("lastName"))?;

    Ok(EmployeeProfile {
        full_name: full_name(&first_name, &last_name),
        job_title: file.job_title,
        trainings: file.trainings,
    })
}
