/// GraphQL profile source: the single point of contact with the CV tool service.
///
/// One POST per run, no retries. A failed request aborts the generation.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use crate::fetch::queries::employee_query;
use crate::fetch::{full_name, FetchError, ProfileSource};
use crate::models::{EmployeeProfile, TrainingRecord};

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<EmployeeData>,
    #[serde(default)]
    errors: Vec<GraphQlErrorBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmployeeData {
    employee_by_ad_name: Option<Vec<EmployeeNode>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmployeeNode {
    first_name: Option<String>,
    last_name: Option<String>,
    #[serde(default)]
    job_title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    trainings: Vec<TrainingRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    projects: Vec<NamedNode>,
    #[serde(default, deserialize_with = "null_as_default")]
    technology_ratings: Vec<NamedNode>,
}

#[derive(Debug, Deserialize)]
struct NamedNode {
    #[serde(default)]
    name: Option<String>,
}

/// GraphQL list fields are nullable; `null` reads the same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorBody {
    message: String,
}

/// Fetches profiles from the CV tool GraphQL endpoint.
#[derive(Clone)]
pub struct GraphQlSource {
    client: Client,
    endpoint: String,
}

impl GraphQlSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(endpoint, client))
    }

    pub fn with_client(endpoint: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl ProfileSource for GraphQlSource {
    async fn fetch_profile(&self, username: &str) -> Result<EmployeeProfile, FetchError> {
        let query = employee_query(username);
        info!("Fetching profile for '{}' from {}", username, self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(&GraphQlRequest { query: &query })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Prefer the GraphQL error message when the body carries one
            let message = serde_json::from_str::<GraphQlResponse>(&body)
                .ok()
                .and_then(|r| r.errors.into_iter().next())
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GraphQlResponse = serde_json::from_str(&body)?;
        extract_profile(parsed, username)
    }
}

/// Maps the raw GraphQL payload onto an `EmployeeProfile`.
///
/// The service returns a list even though AD names are unique; only the first
/// element is used.
fn extract_profile(
    response: GraphQlResponse,
    username: &str,
) -> Result<EmployeeProfile, FetchError> {
    if !response.errors.is_empty() {
        let messages = response
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(FetchError::GraphQl(messages));
    }

    let employees = response
        .data
        .ok_or(FetchError::MissingField("data"))?
        .employee_by_ad_name
        .ok_or(FetchError::MissingField("employeeByAdName"))?;

    let employee = employees
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::NotFound {
            username: username.to_string(),
        })?;

    let first_name = employee
        .first_name
        .ok_or(FetchError::MissingField("firstName"))?;
    let last_name = employee
        .last_name
        .ok_or(FetchError::MissingField("lastName"))?;

    debug!(
        "Employee '{}' has {} projects and {} technology ratings (not rendered): {:?} / {:?}",
        username,
        employee.projects.len(),
        employee.technology_ratings.len(),
        employee
            .projects
            .iter()
            .filter_map(|p| p.name.as_deref())
            .collect::<Vec<_>>(),
        employee
            .technology_ratings
            .iter()
            .filter_map(|t| t.name.as_deref())
            .collect::<Vec<_>>(),
    );

    Ok(EmployeeProfile {
        full_name: full_name(&first_name, &last_name),
        job_title: employee.job_title.unwrap_or_default(),
        trainings: employee.trainings,
    })
}
