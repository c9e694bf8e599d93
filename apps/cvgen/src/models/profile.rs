use serde::{Deserialize, Deserializer, Serialize};

/// Everything the CV builder reads about an employee.
/// Produced once by a `ProfileSource`, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    pub full_name: String,
    pub job_title: String,
    pub trainings: Vec<TrainingRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingRecord {
    pub title: String,
    pub organisation: String,
    #[serde(deserialize_with = "string_or_number")]
    pub year: String,
}

impl TrainingRecord {
    #[allow(dead_code)]
    pub fn new(
        title: impl Into<String>,
        organisation: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            organisation: organisation.into(),
            year: year.into(),
        }
    }
}

/// Profile exports write years either as `"2020"` or `2020`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Text(String),
        Number(i64),
    }

    Ok(match Year::deserialize(deserializer)? {
        Year::Text(s) => s,
        Year::Number(n) => n.to_string(),
    })
}
