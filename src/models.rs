//! Companies, jobs and the request payloads sent to the backend.

use serde::{Deserialize, Deserializer, Serialize};

use crate::user::JobId;

/// A company as listed by `GET /companies` or `GET /companies/:handle`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Unique slug used in URLs (e.g., "anderson-arias-morrow").
    pub handle: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub num_employees: Option<u64>,

    #[serde(default)]
    pub logo_url: Option<String>,

    /// Open positions. Only the detail endpoint fills this in.
    #[serde(default)]
    pub jobs: Vec<Job>,
}

/// A job posting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,

    pub title: String,

    #[serde(default)]
    pub salary: Option<u64>,

    /// Equity fraction as sent by the backend (e.g., "0.05").
    #[serde(default, deserialize_with = "deserialize_equity")]
    pub equity: Option<String>,

    #[serde(default)]
    pub company_handle: Option<String>,

    #[serde(default)]
    pub company_name: Option<String>,
}

/// Deserializes equity, which arrives as a numeric string from Postgres but
/// as a plain number from some fixtures.
fn deserialize_equity<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum EquityValue {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(
        Option::<EquityValue>::deserialize(deserializer)?.map(|value| match value {
            EquityValue::Text(text) => text,
            EquityValue::Number(number) => number.to_string(),
        }),
    )
}

/// Body of `POST /auth/token`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

/// Body of `POST /auth/register`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupData {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Body of `PATCH /users/:username`. The backend requires the current
/// password to confirm the change.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_list_entry_without_jobs() {
        let json = r#"{
            "handle": "anderson-arias-morrow",
            "name": "Anderson, Arias and Morrow",
            "description": "Somebody program how I.",
            "numEmployees": 245,
            "logoUrl": "/logos/logo3.png"
        }"#;

        let company: Company = serde_json::from_str(json).unwrap();
        assert_eq!(company.handle, "anderson-arias-morrow");
        assert_eq!(company.num_employees, Some(245));
        assert_eq!(company.logo_url.as_deref(), Some("/logos/logo3.png"));
        assert!(company.jobs.is_empty());
    }

    #[test]
    fn test_company_detail_with_jobs_and_nulls() {
        let json = r#"{
            "handle": "bauer-gallagher",
            "name": "Bauer-Gallagher",
            "description": "Difficult ready trip question produce produce someone.",
            "numEmployees": null,
            "logoUrl": null,
            "jobs": [
                { "id": 7, "title": "Chemist", "salary": 120000, "equity": "0" },
                { "id": 9, "title": "Ecologist", "salary": null, "equity": null }
            ]
        }"#;

        let company: Company = serde_json::from_str(json).unwrap();
        assert!(company.num_employees.is_none());
        assert!(company.logo_url.is_none());
        assert_eq!(company.jobs.len(), 2);
        assert_eq!(company.jobs[0].equity.as_deref(), Some("0"));
        assert!(company.jobs[1].salary.is_none());
    }

    #[test]
    fn test_job_from_job_list() {
        let json = r#"{
            "id": 42,
            "title": "Conservator, furniture",
            "salary": 110000,
            "equity": "0.081",
            "companyHandle": "watson-davis",
            "companyName": "Watson-Davis"
        }"#;

        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.id, 42);
        assert_eq!(job.equity.as_deref(), Some("0.081"));
        assert_eq!(job.company_handle.as_deref(), Some("watson-davis"));
        assert_eq!(job.company_name.as_deref(), Some("Watson-Davis"));
    }

    #[test]
    fn test_job_with_numeric_equity() {
        let json = r#"{ "id": 1, "title": "Engineer", "equity": 0.5 }"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.equity.as_deref(), Some("0.5"));
    }

    #[test]
    fn test_job_without_equity_field() {
        let json = r#"{ "id": 1, "title": "Engineer" }"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert!(job.equity.is_none());
        assert!(job.company_name.is_none());
    }

    #[test]
    fn test_signup_payload_is_camel_case() {
        let data = SignupData {
            username: "new".to_string(),
            password: "secret".to_string(),
            first_name: "New".to_string(),
            last_name: "Person".to_string(),
            email: "new@example.com".to_string(),
        };

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["firstName"], "New");
        assert_eq!(json["lastName"], "Person");
        assert!(json.get("first_name").is_none());
    }

    #[test]
    fn test_profile_update_payload() {
        let update = ProfileUpdate {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: "test@example.com".to_string(),
            password: "password".to_string(),
        };

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["email"], "test@example.com");
        assert_eq!(json["password"], "password");
    }
}
