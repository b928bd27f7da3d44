use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::profile::models::{default_currency, SalaryExpectation};

pub const INDUSTRIES: &[&str] = &[
    "technology",
    "healthcare",
    "finance",
    "education",
    "manufacturing",
    "retail",
    "media",
    "government",
    "non-profit",
    "consulting",
    "real-estate",
    "agriculture",
    "tourism",
    "logistics",
    "energy",
];

pub const CATEGORIES: &[&str] = &[
    "engineering",
    "management",
    "creative",
    "analytical",
    "service",
    "technical",
    "sales",
    "marketing",
    "operations",
    "research",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationRequirements {
    pub minimum: String,
    pub preferred: Vec<String>,
    pub specific_degrees: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSkill {
    pub skill: String,
    pub importance: String,
    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftSkill {
    pub skill: String,
    pub importance: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSkill {
    pub language: String,
    pub proficiency: String,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CareerSkills {
    pub technical: Vec<TechnicalSkill>,
    pub soft: Vec<SoftSkill>,
    pub languages: Vec<LanguageSkill>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceBand {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub typical_roles: Vec<String>,
    pub salary_range: SalaryExpectation,
}

impl Default for ExperienceBand {
    fn default() -> Self {
        Self {
            description: String::new(),
            typical_roles: Vec::new(),
            salary_range: SalaryExpectation {
                min: 0,
                max: 0,
                currency: default_currency(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceBands {
    pub entry_level: ExperienceBand,
    pub mid_level: ExperienceBand,
    pub senior_level: ExperienceBand,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GrowthProspects {
    pub market_demand: String,
    pub growth_rate: Option<String>,
    pub future_outlook: Option<String>,
    pub emerging_trends: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkEnvironmentInfo {
    pub location: Option<String>,
    pub schedule: Option<String>,
    pub team_size: Option<String>,
    pub travel: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub importance: Option<String>,
    #[serde(default)]
    pub cost: Option<i64>,
    #[serde(default)]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStep {
    pub step: i32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub resources: Vec<String>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalVariation {
    pub region: String,
    #[serde(default)]
    pub opportunities: String,
    #[serde(default)]
    pub salary_adjustment: f64,
}

/// India-specific catalog context carried alongside each career.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegionalContext {
    pub top_companies: Vec<String>,
    pub major_cities: Vec<String>,
    pub government_opportunities: Vec<String>,
    pub startup_ecosystem: bool,
    pub skill_gap: Option<String>,
    pub regional_variations: Vec<RegionalVariation>,
}

/// A career catalog row. Reference data, seeded out of band; only active rows
/// are ever served.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CareerPathRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub industry: String,
    pub category: String,
    pub education_requirements: Json<EducationRequirements>,
    pub skills: Json<CareerSkills>,
    pub experience: Json<ExperienceBands>,
    pub growth_prospects: Json<GrowthProspects>,
    pub work_environment: Json<WorkEnvironmentInfo>,
    pub certifications: Json<Vec<Certification>>,
    pub learning_path: Json<Vec<LearningStep>>,
    pub regional_context: Json<RegionalContext>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerSummary {
    pub id: Uuid,
    pub title: String,
    pub industry: String,
    pub category: String,
    pub market_demand: String,
    pub entry_level_salary: SalaryExpectation,
    pub education_required: String,
    pub top_skills: Vec<String>,
}

impl CareerPathRow {
    pub fn summary(&self) -> CareerSummary {
        CareerSummary {
            id: self.id,
            title: self.title.clone(),
            industry: self.industry.clone(),
            category: self.category.clone(),
            market_demand: self.growth_prospects.0.market_demand.clone(),
            entry_level_salary: self.experience.0.entry_level.salary_range.clone(),
            education_required: self.education_requirements.0.minimum.clone(),
            top_skills: self
                .skills
                .0
                .technical
                .iter()
                .take(5)
                .map(|s| s.skill.clone())
                .collect(),
        }
    }
}
