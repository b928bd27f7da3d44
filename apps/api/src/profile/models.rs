use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Education section of a profile. All fields defaulted so partially-filled
/// documents (and the empty-object column default) deserialize cleanly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub current_level: String,
    pub stream: Option<String>,
    pub specialization: Option<String>,
    pub institution: Option<String>,
    pub year_of_passing: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    pub level: String,
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interest {
    pub category: String,
    #[serde(default)]
    pub specific_interests: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryExpectation {
    pub min: i64,
    pub max: i64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

pub fn default_currency() -> String {
    "INR".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CareerGoals {
    pub short_term: Option<String>,
    pub long_term: Option<String>,
    pub preferred_industries: Vec<String>,
    pub salary_expectation: Option<SalaryExpectation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub work_environment: Option<String>,
    pub work_schedule: Option<String>,
    pub team_size: Option<String>,
}

/// Denormalized copy of the latest completed assessment. Eventually consistent;
/// the assessment record is the source of truth.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssessmentResultsSummary {
    pub personality_type: Option<String>,
    pub learning_style: Option<String>,
    pub work_style: Option<String>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub last_assessment_date: Option<DateTime<Utc>>,
}

/// A user profile row. Serializes as the public profile — the password hash
/// never leaves the server.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: Option<String>,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub location_state: String,
    pub location_city: String,
    pub location_pincode: Option<String>,
    pub education: Json<Education>,
    pub interests: Json<Vec<Interest>>,
    pub skills: Json<Vec<Skill>>,
    pub career_goals: Json<CareerGoals>,
    pub assessment_results: Json<AssessmentResultsSummary>,
    pub preferences: Json<Preferences>,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
