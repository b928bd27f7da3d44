use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::ai::AssessmentAnalysis;
use crate::errors::AppError;

/// The fixed assessment enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentType {
    Personality,
    Skills,
    Interests,
    Aptitude,
    Comprehensive,
}

impl AssessmentType {
    pub const ALL: [AssessmentType; 5] = [
        AssessmentType::Personality,
        AssessmentType::Skills,
        AssessmentType::Interests,
        AssessmentType::Aptitude,
        AssessmentType::Comprehensive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentType::Personality => "personality",
            AssessmentType::Skills => "skills",
            AssessmentType::Interests => "interests",
            AssessmentType::Aptitude => "aptitude",
            AssessmentType::Comprehensive => "comprehensive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.as_str() == s)
    }
}

/// Assessment lifecycle. `PendingReview` is a reserved terminal state for a
/// future manual-review path; no transition currently reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentStatus {
    InProgress,
    Completed,
    PendingReview,
}

impl AssessmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentStatus::InProgress => "in-progress",
            AssessmentStatus::Completed => "completed",
            AssessmentStatus::PendingReview => "pending-review",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "in-progress" => Some(AssessmentStatus::InProgress),
            "completed" => Some(AssessmentStatus::Completed),
            "pending-review" => Some(AssessmentStatus::PendingReview),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question_id: String,
    pub question: String,
    pub category: String,
    pub weight: i32,
}

/// One answer. At most one per question id; later submissions overwrite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEntry {
    pub question_id: String,
    pub answer: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

// ── Structured results ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityTrait {
    #[serde(rename = "trait")]
    pub name: String,
    pub score: u32,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapEntry {
    pub skill: String,
    pub current_level: String,
    pub potential_level: String,
    pub gap: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestScore {
    pub category: String,
    pub score: u32,
    pub related_careers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AptitudeScore {
    pub area: String,
    pub score: u32,
    pub percentile: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningStyle {
    pub primary: String,
    pub secondary: String,
    pub characteristics: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkStyle {
    pub preferred: String,
    pub characteristics: Vec<String>,
    pub environment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerMatch {
    pub career: String,
    pub match_score: u32,
    pub reasoning: String,
    pub required_skills: Vec<String>,
    pub growth_potential: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResults {
    pub personality_type: String,
    pub personality_traits: Vec<PersonalityTrait>,
    pub skills_profile: Vec<SkillGapEntry>,
    pub interests_profile: Vec<InterestScore>,
    pub aptitudes: Vec<AptitudeScore>,
    pub learning_style: LearningStyle,
    pub work_style: WorkStyle,
    pub career_recommendations: Vec<CareerMatch>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub next_steps: Vec<String>,
}

// ── The persisted record ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRow {
    pub id: Uuid,
    pub profile_id: Uuid,
    #[serde(rename = "type")]
    pub assessment_type: String,
    pub questions: Json<Vec<Question>>,
    pub responses: Json<Vec<ResponseEntry>>,
    pub results: Option<Json<AssessmentResults>>,
    pub ai_analysis: Option<Json<AssessmentAnalysis>>,
    pub status: String,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-facing projection: never carries raw questions or responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSummary {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub assessment_type: String,
    pub status: String,
    pub completion_percentage: u8,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub has_results: bool,
}

impl AssessmentRow {
    pub fn new(profile_id: Uuid, ty: AssessmentType, questions: Vec<Question>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            profile_id,
            assessment_type: ty.as_str().to_string(),
            questions: Json(questions),
            responses: Json(Vec::new()),
            results: None,
            ai_analysis: None,
            status: AssessmentStatus::InProgress.as_str().to_string(),
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// round(100 × responses/questions); zero questions is defined as 0%.
    pub fn completion_percentage(&self) -> u8 {
        let questions = self.questions.0.len();
        if questions == 0 {
            return 0;
        }
        ((self.responses.0.len() as f64 / questions as f64) * 100.0).round() as u8
    }

    /// Upserts a response by question id: replaces the answer and timestamp if
    /// one exists, appends otherwise. Rejects unknown question ids.
    pub fn upsert_response(
        &mut self,
        question_id: &str,
        answer: Value,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if !self
            .questions
            .0
            .iter()
            .any(|q| q.question_id == question_id)
        {
            return Err(AppError::invalid("questionId", "Invalid question ID"));
        }
        match self
            .responses
            .0
            .iter_mut()
            .find(|r| r.question_id == question_id)
        {
            Some(existing) => {
                existing.answer = answer;
                existing.timestamp = now;
            }
            None => self.responses.0.push(ResponseEntry {
                question_id: question_id.to_string(),
                answer,
                score: None,
                timestamp: now,
            }),
        }
        Ok(())
    }

    pub fn is_completed(&self) -> bool {
        self.status == AssessmentStatus::Completed.as_str()
    }

    pub fn summary(&self) -> AssessmentSummary {
        AssessmentSummary {
            id: self.id,
            assessment_type: self.assessment_type.clone(),
            status: self.status.clone(),
            completion_percentage: self.completion_percentage(),
            created_at: self.created_at,
            completed_at: self.completed_at,
            has_results: self.results.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn two_question_row() -> AssessmentRow {
        AssessmentRow::new(
            Uuid::new_v4(),
            AssessmentType::Skills,
            vec![
                Question {
                    question_id: "s1".into(),
                    question: "Rate your proficiency in programming".into(),
                    category: "technical".into(),
                    weight: 1,
                },
                Question {
                    question_id: "s2".into(),
                    question: "How comfortable are you with data analysis?".into(),
                    category: "analytical".into(),
                    weight: 1,
                },
            ],
        )
    }

    #[test]
    fn progress_is_zero_with_no_questions() {
        let row = AssessmentRow::new(Uuid::new_v4(), AssessmentType::Personality, vec![]);
        assert_eq!(row.completion_percentage(), 0);
    }

    #[test]
    fn progress_rounds_per_question() {
        let mut row = two_question_row();
        assert_eq!(row.completion_percentage(), 0);
        row.upsert_response("s1", json!(4), Utc::now()).unwrap();
        assert_eq!(row.completion_percentage(), 50);
        row.upsert_response("s2", json!(3), Utc::now()).unwrap();
        assert_eq!(row.completion_percentage(), 100);
    }

    #[test]
    fn progress_rounds_one_of_three() {
        let mut row = AssessmentRow::new(
            Uuid::new_v4(),
            AssessmentType::Aptitude,
            vec![
                Question {
                    question_id: "a1".into(),
                    question: "q".into(),
                    category: "c".into(),
                    weight: 1,
                },
                Question {
                    question_id: "a2".into(),
                    question: "q".into(),
                    category: "c".into(),
                    weight: 1,
                },
                Question {
                    question_id: "a3".into(),
                    question: "q".into(),
                    category: "c".into(),
                    weight: 1,
                },
            ],
        );
        row.upsert_response("a1", json!(5), Utc::now()).unwrap();
        assert_eq!(row.completion_percentage(), 33);
    }

    #[test]
    fn upsert_overwrites_by_question_id() {
        let mut row = two_question_row();
        row.upsert_response("s1", json!("agree"), Utc::now()).unwrap();
        row.upsert_response("s1", json!("strongly agree"), Utc::now())
            .unwrap();
        assert_eq!(row.responses.0.len(), 1);
        assert_eq!(row.responses.0[0].answer, json!("strongly agree"));
    }

    #[test]
    fn upsert_rejects_unknown_question() {
        let mut row = two_question_row();
        let err = row.upsert_response("nope", json!(1), Utc::now());
        assert!(matches!(err, Err(AppError::Validation(_))));
        assert!(row.responses.0.is_empty());
    }

    #[test]
    fn responses_never_exceed_questions() {
        let mut row = two_question_row();
        for _ in 0..5 {
            row.upsert_response("s1", json!(2), Utc::now()).unwrap();
            row.upsert_response("s2", json!(3), Utc::now()).unwrap();
        }
        assert!(row.responses.0.len() <= row.questions.0.len());
    }

    #[test]
    fn summary_reflects_results_presence() {
        let row = two_question_row();
        let summary = row.summary();
        assert_eq!(summary.status, "in-progress");
        assert!(!summary.has_results);
        assert_eq!(summary.completion_percentage, 0);
    }

    #[test]
    fn type_and_status_round_trip() {
        for ty in AssessmentType::ALL {
            assert_eq!(AssessmentType::parse(ty.as_str()), Some(ty));
        }
        assert!(AssessmentType::parse("astrology").is_none());
        assert_eq!(
            AssessmentStatus::parse("pending-review"),
            Some(AssessmentStatus::PendingReview)
        );
    }
}
