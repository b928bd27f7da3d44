use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::types::Json as Db;
use uuid::Uuid;

use crate::ai::LearningPathSeed;
use crate::auth::CurrentUser;
use crate::career::models::CareerPathRow;
use crate::errors::{AppError, FieldError};
use crate::profile::models::Skill;
use crate::profile::validation;
use crate::skills::analysis;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapQuery {
    pub career_path: Uuid,
}

/// GET /api/skills/gap-analysis?careerPath=<id>
pub async fn handle_gap_analysis(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<GapQuery>,
) -> Result<Json<Value>, AppError> {
    if user.skills.0.is_empty() {
        return Err(AppError::Conflict(
            "Please add your skills to your profile first".to_string(),
        ));
    }

    let career = sqlx::query_as::<_, CareerPathRow>(
        "SELECT * FROM career_paths WHERE id = $1 AND is_active = TRUE",
    )
    .bind(query.career_path)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("Career path not found".to_string()))?;

    let outcome = state.ai.skills_gap(&user.skills.0, &career.skills.0).await;
    if outcome.degraded {
        tracing::warn!("skills gap for {} degraded to defaults", user.id);
    }

    Ok(Json(json!({
        "career": career.summary(),
        "analysis": outcome.data,
        "aiDegraded": outcome.degraded,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPathRequest {
    pub career_goal: String,
    #[serde(default)]
    pub time_commitment: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
}

/// POST /api/skills/learning-path
pub async fn handle_learning_path(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<LearningPathRequest>,
) -> Result<Json<Value>, AppError> {
    let mut errors = Vec::new();
    let goal = req.career_goal.trim();
    if goal.is_empty() {
        errors.push(FieldError::new("careerGoal", "Career goal is required"));
    }
    if let Some(tc) = &req.time_commitment {
        if !analysis::TIME_COMMITMENTS.contains(&tc.as_str()) {
            errors.push(FieldError::new(
                "timeCommitment",
                format!("Must be one of: {}", analysis::TIME_COMMITMENTS.join(", ")),
            ));
        }
    }
    if let Some(budget) = &req.budget {
        if !analysis::BUDGETS.contains(&budget.as_str()) {
            errors.push(FieldError::new(
                "budget",
                format!("Must be one of: {}", analysis::BUDGETS.join(", ")),
            ));
        }
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    // Anchor the plan on a catalog career when the goal matches one.
    let career = sqlx::query_as::<_, CareerPathRow>(
        "SELECT * FROM career_paths
         WHERE title ILIKE $1 AND is_active = TRUE
         LIMIT 1",
    )
    .bind(format!("%{goal}%"))
    .fetch_optional(&state.db)
    .await?;

    let seed = LearningPathSeed {
        required_skills: career
            .as_ref()
            .map(|c| {
                c.skills
                    .0
                    .technical
                    .iter()
                    .map(|s| s.skill.clone())
                    .collect()
            })
            .unwrap_or_default(),
        current_skills: user.skills.0.iter().map(|s| s.name.clone()).collect(),
        time_commitment: req.time_commitment.clone(),
        budget: req.budget.clone(),
    };
    let outcome = state.ai.learning_path(&user, goal, &seed).await;

    Ok(Json(json!({
        "careerGoal": goal,
        "matchedCareer": career.as_ref().map(|c| c.summary()),
        "learningPath": outcome.data,
        "aiDegraded": outcome.degraded,
    })))
}

/// GET /api/skills/recommendations
pub async fn handle_recommendations(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, AppError> {
    if user.interests.0.is_empty() {
        return Err(AppError::Conflict(
            "Please add your interests to get skill recommendations".to_string(),
        ));
    }

    let categories: Vec<String> = user
        .interests
        .0
        .iter()
        .map(|i| i.category.clone())
        .collect();

    let careers = sqlx::query_as::<_, CareerPathRow>(
        "SELECT * FROM career_paths
         WHERE is_active = TRUE AND industry = ANY($1)
         LIMIT 10",
    )
    .bind(&categories)
    .fetch_all(&state.db)
    .await?;

    let recommendations = analysis::recommend_skills(&careers, &user.skills.0);
    Ok(Json(json!({
        "basedOnInterests": categories,
        "recommendations": recommendations,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRequest {
    pub skill_name: String,
    pub level: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// POST /api/skills/progress — records or updates one skill on the profile.
pub async fn handle_progress(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<ProgressRequest>,
) -> Result<Json<Value>, AppError> {
    let mut errors = Vec::new();
    let name = req.skill_name.trim();
    if name.is_empty() {
        errors.push(FieldError::new("skillName", "Skill name is required"));
    }
    if !analysis::LEVELS.contains(&req.level.as_str()) {
        errors.push(FieldError::new(
            "level",
            format!("Must be one of: {}", analysis::LEVELS.join(", ")),
        ));
    }
    if let Some(category) = &req.category {
        errors.extend(validation::validate_enum(
            "category",
            category,
            validation::SKILL_CATEGORIES,
        ));
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let mut skills = user.skills.0.clone();
    match skills
        .iter_mut()
        .find(|s| s.name.eq_ignore_ascii_case(name))
    {
        Some(existing) => {
            existing.level = req.level.clone();
            if let Some(category) = &req.category {
                existing.category = category.clone();
            }
        }
        None => skills.push(Skill {
            name: name.to_string(),
            level: req.level.clone(),
            category: req.category.clone().unwrap_or_else(|| "technical".to_string()),
        }),
    }

    sqlx::query("UPDATE profiles SET skills = $2, updated_at = NOW() WHERE id = $1")
        .bind(user.id)
        .bind(Db(&skills))
        .execute(&state.db)
        .await?;

    Ok(Json(json!({
        "message": "Skill progress recorded",
        "skills": skills,
    })))
}

/// GET /api/skills/roadmap/:skillName
pub async fn handle_roadmap(
    CurrentUser(user): CurrentUser,
    Path(skill_name): Path<String>,
) -> Result<Json<Value>, AppError> {
    let skill = user
        .skills
        .0
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(&skill_name))
        .ok_or_else(|| AppError::NotFound("Skill not found in your profile".to_string()))?;

    let stages = analysis::skill_roadmap(&skill.name, &skill.level);
    Ok(Json(json!({
        "skill": skill.name,
        "currentLevel": skill.level,
        "nextLevel": analysis::next_level(&skill.level),
        "roadmap": stages,
    })))
}

/// GET /api/skills/trending
pub async fn handle_trending() -> Json<Value> {
    Json(json!({ "trending": analysis::trending_skills() }))
}

/// GET /api/skills/assessment/:skillName
pub async fn handle_quiz_questions(
    CurrentUser(_user): CurrentUser,
    Path(skill_name): Path<String>,
) -> Result<Json<Value>, AppError> {
    let name = skill_name.trim();
    if name.is_empty() {
        return Err(AppError::invalid("skillName", "Skill name is required"));
    }
    Ok(Json(json!({
        "skill": name,
        "questions": analysis::quiz_questions(name),
    })))
}

#[derive(Debug, Deserialize)]
pub struct QuizSubmission {
    pub answers: Vec<bool>,
}

/// POST /api/skills/assessment/:skillName — grades the quiz and upserts the
/// skill at the graded level.
pub async fn handle_quiz_submit(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(skill_name): Path<String>,
    Json(req): Json<QuizSubmission>,
) -> Result<Json<Value>, AppError> {
    let name = skill_name.trim();
    let expected = analysis::quiz_questions(name).len();
    if req.answers.len() != expected {
        return Err(AppError::invalid(
            "answers",
            format!("Expected {expected} answers"),
        ));
    }

    let yes = req.answers.iter().filter(|a| **a).count();
    let level = analysis::level_for_yes_count(yes);

    let mut skills = user.skills.0.clone();
    match skills
        .iter_mut()
        .find(|s| s.name.eq_ignore_ascii_case(name))
    {
        Some(existing) => existing.level = level.to_string(),
        None => skills.push(Skill {
            name: name.to_string(),
            level: level.to_string(),
            category: "technical".to_string(),
        }),
    }
    sqlx::query("UPDATE profiles SET skills = $2, updated_at = NOW() WHERE id = $1")
        .bind(user.id)
        .bind(Db(&skills))
        .execute(&state.db)
        .await?;

    Ok(Json(json!({
        "skill": name,
        "level": level,
        "score": yes,
        "outOf": expected,
        "recommendations": analysis::recommendations_for_level(name, level),
    })))
}
