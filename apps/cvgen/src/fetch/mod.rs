//! Profile sources, i.e. where the CV data comes from.
//!
//! Two interchangeable sources sit behind `ProfileSource`: the remote GraphQL
//! service (default) and a local JSON export. Neither retries.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::EmployeeProfile;

pub mod file;
pub mod graphql;
pub mod queries;

pub use file::FileSource;
pub use graphql::GraphQlSource;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Profile service error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("No employee found for '{username}'")]
    NotFound { username: String },

    #[error("Response is missing field '{0}'")]
    MissingField(&'static str),

    #[error("Failed to read profile file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A place an `EmployeeProfile` can be loaded from.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_profile(&self, username: &str) -> Result<EmployeeProfile, FetchError>;
}

/// Joins first and last name the way the CV title prints them.
pub(crate) fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}")
}
