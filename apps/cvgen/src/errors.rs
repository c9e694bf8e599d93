use thiserror::Error;

use crate::fetch::FetchError;
use crate::render::RenderError;

/// Failure of a whole generation run. Nothing is recovered locally; the binary
/// logs the error and exits nonzero.
#[derive(Debug, Error)]
pub enum CvError {
    #[error("Failed to fetch profile: {0}")]
    Fetch(#[from] FetchError),

    #[error("Failed to render CV: {0}")]
    Render(#[from] RenderError),
}

impl CvError {
    /// Short machine-friendly tag used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            CvError::Fetch(FetchError::NotFound { .. }) => "PROFILE_NOT_FOUND",
            CvError::Fetch(_) => "FETCH_ERROR",
            CvError::Render(RenderError::Spawn { .. }) => "ENGINE_MISSING",
            CvError::Render(_) => "RENDER_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let not_found = CvError::from(FetchError::NotFound {
            username: "ghost".to_string(),
        });
        assert_eq!(not_found.code(), "PROFILE_NOT_FOUND");
        assert_eq!(
            not_found.to_string(),
            "Failed to fetch profile: No employee found for 'ghost'"
        );

        let missing = CvError::from(FetchError::MissingField("firstName"));
        assert_eq!(missing.code(), "FETCH_ERROR");

        let spawn = CvError::from(RenderError::Spawn {
            program: "lualatex".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        });
        assert_eq!(spawn.code(), "ENGINE_MISSING");
    }
}
