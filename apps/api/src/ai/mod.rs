//! AI Adapter — the single point of entry for all generative-model calls.
//!
//! ARCHITECTURAL RULE: no other module may call the Vertex AI API directly.
//! All model interactions go through `AiService`.
//!
//! Degradation policy: every operation returns its documented static default
//! payload (flagged `degraded: true`) when the model is unconfigured, the call
//! fails, or the reply carries no parseable JSON. Nothing a caller depends on
//! for a response propagates an error past this boundary.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod defaults;
pub mod prompts;

use crate::assessment::models::{Question, ResponseEntry};
use crate::career::models::CareerSkills;
use crate::config::Config;
use crate::profile::models::{ProfileRow, SalaryExpectation, Skill};

const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("model returned empty content")]
    EmptyContent,
}

/// The generative-model seam. Implement this to swap backends (or inject a
/// canned model in tests) without touching the adapter's operations.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;
}

// ── Vertex AI backend ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Vertex AI `generateContent` client (Gemini family).
pub struct VertexModel {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl VertexModel {
    pub fn new(project_id: &str, location: &str, model: &str, access_token: &str) -> Self {
        let endpoint = format!(
            "https://{location}-aiplatform.googleapis.com/v1/projects/{project_id}/locations/{location}/publishers/google/models/{model}:generateContent"
        );
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
            access_token: access_token.to_string(),
        }
    }
}

#[async_trait]
impl GenerativeModel for VertexModel {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().find_map(|p| p.text))
            .filter(|t| !t.is_empty())
            .ok_or(ModelError::EmptyContent)?;

        debug!("model call succeeded ({} chars)", text.len());
        Ok(text)
    }
}

// ── Operation payloads ──────────────────────────────────────────────────────

/// Result of an adapter operation. `degraded` is true when the payload is the
/// static fallback rather than a live model reply.
#[derive(Debug, Clone, Serialize)]
pub struct AiOutcome<T> {
    pub data: T,
    pub degraded: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentAnalysis {
    pub personality_analysis: String,
    pub skills_analysis: String,
    pub interest_analysis: String,
    pub aptitude_analysis: String,
    #[serde(default)]
    pub learning_recommendations: Vec<String>,
    pub work_style_insights: String,
    pub career_compatibility: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerRecommendation {
    pub career: String,
    pub match_score: u32,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub growth_potential: String,
    #[serde(default)]
    pub salary_range: Option<SalaryExpectation>,
    #[serde(default)]
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerRecommendations {
    #[serde(default)]
    pub recommendations: Vec<CareerRecommendation>,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnownSkill {
    pub skill: String,
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingSkill {
    pub skill: String,
    pub priority: String,
    #[serde(default)]
    pub time_to_learn: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillToImprove {
    pub skill: String,
    pub current_level: String,
    pub target_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsGapAnalysis {
    #[serde(default)]
    pub current_skills: Vec<KnownSkill>,
    #[serde(default)]
    pub missing_skills: Vec<MissingSkill>,
    #[serde(default)]
    pub skills_to_improve: Vec<SkillToImprove>,
    #[serde(default)]
    pub learning_priorities: Vec<String>,
    #[serde(default)]
    pub timeline: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub name: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub cost: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPhase {
    pub name: String,
    pub duration: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub milestones: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationRef {
    pub name: String,
    #[serde(default)]
    pub provider: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    #[serde(default)]
    pub phases: Vec<LearningPhase>,
    #[serde(default)]
    pub total_duration: String,
    #[serde(default)]
    pub estimated_cost: String,
    #[serde(default)]
    pub certifications: Vec<CertificationRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalaryBenchmarks {
    pub entry: String,
    pub mid: String,
    pub senior: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketInsights {
    #[serde(default)]
    pub market_trends: Vec<String>,
    #[serde(default)]
    pub salary_benchmarks: SalaryBenchmarks,
    #[serde(default)]
    pub skill_demands: Vec<String>,
    #[serde(default)]
    pub growth_opportunities: Vec<String>,
    #[serde(default)]
    pub challenges: Vec<String>,
    #[serde(default)]
    pub future_outlook: String,
    #[serde(default)]
    pub top_companies: Vec<String>,
    #[serde(default)]
    pub emerging_roles: Vec<String>,
}

/// Inputs for the narrative assessment analysis.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentContext<'a> {
    pub assessment_type: &'a str,
    pub questions: &'a [Question],
    pub responses: &'a [ResponseEntry],
}

/// Inputs for learning-path generation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPathSeed {
    pub required_skills: Vec<String>,
    pub current_skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_commitment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
}

// ── The adapter ─────────────────────────────────────────────────────────────

pub struct AiService {
    model: Option<Arc<dyn GenerativeModel>>,
}

impl AiService {
    pub fn from_config(config: &Config) -> Self {
        match (&config.ai_project_id, &config.ai_access_token) {
            (Some(project), Some(token)) => Self {
                model: Some(Arc::new(VertexModel::new(
                    project,
                    &config.ai_location,
                    &config.ai_model,
                    token,
                ))),
            },
            _ => {
                warn!("GOOGLE_CLOUD_PROJECT_ID not set; AI operations serve static fallbacks");
                Self { model: None }
            }
        }
    }

    /// Adapter with no model configured; every operation degrades to defaults.
    pub fn disabled() -> Self {
        Self { model: None }
    }

    pub fn with_model(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model: Some(model) }
    }

    pub fn is_configured(&self) -> bool {
        self.model.is_some()
    }

    /// Calls the model and parses the first JSON object out of its free-text
    /// reply. `None` on any failure; callers substitute the operation default.
    async fn generate_json<T: DeserializeOwned>(&self, prompt: &str) -> Option<T> {
        let model = self.model.as_ref()?;
        let text = match model.generate(prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("model call failed: {e}");
                return None;
            }
        };
        let json = extract_json_object(&text)?;
        match serde_json::from_str(json) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("model reply was not parseable JSON: {e}");
                None
            }
        }
    }

    pub async fn analyze_assessment(
        &self,
        ctx: &AssessmentContext<'_>,
    ) -> AiOutcome<AssessmentAnalysis> {
        let prompt = prompts::assessment_analysis_prompt(ctx);
        match self.generate_json(&prompt).await {
            Some(data) => AiOutcome {
                data,
                degraded: false,
            },
            None => AiOutcome {
                data: defaults::assessment_analysis(),
                degraded: true,
            },
        }
    }

    pub async fn career_recommendations(
        &self,
        profile: &ProfileRow,
    ) -> AiOutcome<CareerRecommendations> {
        let prompt = prompts::career_recommendation_prompt(profile);
        match self.generate_json(&prompt).await {
            Some(data) => AiOutcome {
                data,
                degraded: false,
            },
            None => AiOutcome {
                data: defaults::career_recommendations(),
                degraded: true,
            },
        }
    }

    pub async fn skills_gap(
        &self,
        user_skills: &[Skill],
        career_requirements: &CareerSkills,
    ) -> AiOutcome<SkillsGapAnalysis> {
        let prompt = prompts::skills_gap_prompt(user_skills, career_requirements);
        match self.generate_json(&prompt).await {
            Some(data) => AiOutcome {
                data,
                degraded: false,
            },
            None => AiOutcome {
                data: defaults::skills_gap(),
                degraded: true,
            },
        }
    }

    pub async fn learning_path(
        &self,
        profile: &ProfileRow,
        career_goal: &str,
        seed: &LearningPathSeed,
    ) -> AiOutcome<LearningPath> {
        let prompt = prompts::learning_path_prompt(profile, career_goal, seed);
        match self.generate_json(&prompt).await {
            Some(data) => AiOutcome {
                data,
                degraded: false,
            },
            None => AiOutcome {
                data: defaults::learning_path(),
                degraded: true,
            },
        }
    }

    pub async fn market_insights(
        &self,
        industry: &str,
        location: &str,
    ) -> AiOutcome<MarketInsights> {
        let prompt = prompts::market_insights_prompt(industry, location);
        match self.generate_json(&prompt).await {
            Some(data) => AiOutcome {
                data,
                degraded: false,
            },
            None => AiOutcome {
                data: defaults::market_insights(industry),
                degraded: true,
            },
        }
    }
}

/// Extracts the first JSON object in a free-text reply: the span from the
/// first `{` to the last `}`. Models often wrap the object in prose or fences.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::career::models::CareerSkills;

    struct CannedModel(&'static str);

    #[async_trait]
    impl GenerativeModel for CannedModel {
        async fn generate(&self, _prompt: &str) -> Result<String, ModelError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingModel;

    #[async_trait]
    impl GenerativeModel for FailingModel {
        async fn generate(&self, _prompt: &str) -> Result<String, ModelError> {
            Err(ModelError::EmptyContent)
        }
    }

    #[test]
    fn extract_json_spans_first_brace_to_last() {
        let text = "Sure! Here is the JSON:\n{\"a\": {\"b\": 1}}\nHope that helps.";
        assert_eq!(extract_json_object(text), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn extract_json_none_without_braces() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }

    #[tokio::test]
    async fn unconfigured_adapter_degrades_every_operation() {
        let ai = AiService::disabled();

        let skills = ai.skills_gap(&[], &CareerSkills::default()).await;
        assert!(skills.degraded);
        assert!(!skills.data.missing_skills.is_empty());

        let insights = ai.market_insights("technology", "Pune, Maharashtra").await;
        assert!(insights.degraded);
        assert!(!insights.data.future_outlook.is_empty());

        let ctx = AssessmentContext {
            assessment_type: "skills",
            questions: &[],
            responses: &[],
        };
        let analysis = ai.analyze_assessment(&ctx).await;
        assert!(analysis.degraded);
        assert!(!analysis.data.personality_analysis.is_empty());
    }

    #[tokio::test]
    async fn failing_model_degrades_to_defaults() {
        let ai = AiService::with_model(Arc::new(FailingModel));
        let outcome = ai.market_insights("finance", "Mumbai").await;
        assert!(outcome.degraded);
        assert!(!outcome.data.market_trends.is_empty());
    }

    #[tokio::test]
    async fn prose_wrapped_json_parses_cleanly() {
        let ai = AiService::with_model(Arc::new(CannedModel(
            "Here you go:\n{\"marketTrends\": [\"remote work\"], \"futureOutlook\": \"bright\"}\nThanks!",
        )));
        let outcome = ai.market_insights("technology", "Bengaluru").await;
        assert!(!outcome.degraded);
        assert_eq!(outcome.data.market_trends, vec!["remote work"]);
        assert_eq!(outcome.data.future_outlook, "bright");
    }

    #[tokio::test]
    async fn garbage_reply_degrades() {
        let ai = AiService::with_model(Arc::new(CannedModel("I cannot answer that.")));
        let outcome = ai.market_insights("technology", "Delhi").await;
        assert!(outcome.degraded);
    }
}
