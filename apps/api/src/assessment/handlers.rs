use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::types::Json as Db;
use uuid::Uuid;

use crate::ai::AssessmentContext;
use crate::assessment::models::{AssessmentRow, AssessmentStatus, AssessmentType};
use crate::assessment::questions::{catalog, question_set};
use crate::assessment::scoring::project_results;
use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::profile::models::AssessmentResultsSummary;
use crate::state::AppState;

/// GET /api/assessment/available
pub async fn handle_available(CurrentUser(_user): CurrentUser) -> Json<Value> {
    Json(json!({ "assessments": catalog() }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRequest {
    #[serde(rename = "type")]
    pub assessment_type: String,
}

enum StartOutcome {
    Resumed(AssessmentRow),
    Created(AssessmentRow),
}

/// Pure start decision: an open assessment of the same type is resumed,
/// otherwise a fresh row is built from the type's question template.
fn resume_or_create(
    profile_id: Uuid,
    ty: AssessmentType,
    existing: Option<AssessmentRow>,
) -> StartOutcome {
    match existing {
        Some(row) => StartOutcome::Resumed(row),
        None => StartOutcome::Created(AssessmentRow::new(profile_id, ty, question_set(ty))),
    }
}

fn resume_response(row: AssessmentRow) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "message": "Resuming existing assessment",
            "assessment": row.summary(),
            "questions": row.questions.0,
        })),
    )
}

/// POST /api/assessment/start
///
/// Starting a type that already has an in-progress record resumes it instead
/// of creating a second one. A concurrent duplicate start loses the insert to
/// the partial unique index and also gets resume semantics.
pub async fn handle_start(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<StartRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let ty = AssessmentType::parse(&req.assessment_type)
        .ok_or_else(|| AppError::invalid("type", "Please select a valid assessment type"))?;

    let existing = fetch_open(&state, user.id, ty).await?;
    let row = match resume_or_create(user.id, ty, existing) {
        StartOutcome::Resumed(row) => return Ok(resume_response(row)),
        StartOutcome::Created(row) => row,
    };

    let insert = sqlx::query(
        "INSERT INTO assessments
            (id, profile_id, assessment_type, questions, responses, status, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(row.id)
    .bind(row.profile_id)
    .bind(&row.assessment_type)
    .bind(&row.questions)
    .bind(&row.responses)
    .bind(&row.status)
    .bind(row.created_at)
    .bind(row.updated_at)
    .execute(&state.db)
    .await;

    match insert {
        Ok(_) => {
            tracing::info!("started {} assessment {}", row.assessment_type, row.id);
            Ok((
                StatusCode::CREATED,
                Json(json!({
                    "message": "Assessment started successfully",
                    "assessment": row.summary(),
                    "questions": row.questions.0,
                })),
            ))
        }
        Err(e) if matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation()) => {
            match fetch_open(&state, user.id, ty).await? {
                Some(winner) => Ok(resume_response(winner)),
                None => Err(e.into()),
            }
        }
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRequest {
    pub question_id: String,
    pub answer: Value,
}

/// POST /api/assessment/:id/response
pub async fn handle_response(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ResponseRequest>,
) -> Result<Json<Value>, AppError> {
    let mut row = fetch_in_progress(&state, id, user.id).await?;
    row.upsert_response(&req.question_id, req.answer, Utc::now())?;

    sqlx::query("UPDATE assessments SET responses = $2, updated_at = NOW() WHERE id = $1")
        .bind(row.id)
        .bind(&row.responses)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({
        "message": "Response recorded",
        "progress": row.completion_percentage(),
    })))
}

/// POST /api/assessment/:id/complete
///
/// Scores the assessment, asks the model for a narrative analysis, then writes
/// the assessment and the profile summary in one transaction so the two can
/// never diverge.
pub async fn handle_complete(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let row = fetch_in_progress(&state, id, user.id).await?;

    if row.responses.0.len() < row.questions.0.len() {
        return Err(AppError::IncompleteAssessment {
            progress: row.completion_percentage(),
        });
    }

    let ty = AssessmentType::parse(&row.assessment_type)
        .ok_or_else(|| anyhow::anyhow!("unknown assessment type {}", row.assessment_type))?;
    let results = project_results(ty, &row.questions.0, &row.responses.0);

    let analysis = state
        .ai
        .analyze_assessment(&AssessmentContext {
            assessment_type: row.assessment_type.as_str(),
            questions: &row.questions.0,
            responses: &row.responses.0,
        })
        .await;
    if analysis.degraded {
        tracing::warn!("assessment {} analysis degraded to defaults", row.id);
    }

    let now = Utc::now();
    let summary = AssessmentResultsSummary {
        personality_type: Some(results.personality_type.clone()),
        learning_style: Some(results.learning_style.primary.clone()),
        work_style: Some(results.work_style.preferred.clone()),
        strengths: results.strengths.clone(),
        areas_for_improvement: results.areas_for_improvement.clone(),
        last_assessment_date: Some(now),
    };

    let mut tx = state.db.begin().await?;
    sqlx::query(
        "UPDATE assessments
         SET results = $2, ai_analysis = $3, status = $4, completed_at = $5, updated_at = $5
         WHERE id = $1",
    )
    .bind(row.id)
    .bind(Db(&results))
    .bind(Db(&analysis.data))
    .bind(AssessmentStatus::Completed.as_str())
    .bind(now)
    .execute(&mut *tx)
    .await?;
    sqlx::query("UPDATE profiles SET assessment_results = $2, updated_at = $3 WHERE id = $1")
        .bind(user.id)
        .bind(Db(&summary))
        .bind(now)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    tracing::info!("completed {} assessment {}", row.assessment_type, row.id);
    Ok(Json(json!({
        "message": "Assessment completed successfully",
        "results": results,
        "aiAnalysis": analysis.data,
        "aiDegraded": analysis.degraded,
    })))
}

/// GET /api/assessment/:id/results
pub async fn handle_results(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let row = sqlx::query_as::<_, AssessmentRow>(
        "SELECT * FROM assessments WHERE id = $1 AND profile_id = $2",
    )
    .bind(id)
    .bind(user.id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("Assessment not found".to_string()))?;

    if !row.is_completed() {
        return Err(AppError::Conflict("Assessment not completed yet".to_string()));
    }

    Ok(Json(json!({
        "assessment": row.summary(),
        "results": row.results,
        "aiAnalysis": row.ai_analysis,
    })))
}

/// GET /api/assessment/history
pub async fn handle_history(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, AppError> {
    let rows = sqlx::query_as::<_, AssessmentRow>(
        "SELECT * FROM assessments WHERE profile_id = $1 ORDER BY created_at DESC",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;

    let history: Vec<_> = rows.iter().map(AssessmentRow::summary).collect();
    Ok(Json(json!({ "assessments": history })))
}

async fn fetch_in_progress(
    state: &AppState,
    id: Uuid,
    profile_id: Uuid,
) -> Result<AssessmentRow, AppError> {
    sqlx::query_as::<_, AssessmentRow>(
        "SELECT * FROM assessments WHERE id = $1 AND profile_id = $2 AND status = $3",
    )
    .bind(id)
    .bind(profile_id)
    .bind(AssessmentStatus::InProgress.as_str())
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("Assessment not found or already completed".to_string()))
}

async fn fetch_open(
    state: &AppState,
    profile_id: Uuid,
    ty: AssessmentType,
) -> Result<Option<AssessmentRow>, AppError> {
    Ok(sqlx::query_as::<_, AssessmentRow>(
        "SELECT * FROM assessments
         WHERE profile_id = $1 AND assessment_type = $2 AND status = $3",
    )
    .bind(profile_id)
    .bind(ty.as_str())
    .bind(AssessmentStatus::InProgress.as_str())
    .fetch_optional(&state.db)
    .await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::models::Question;
    use crate::assessment::scoring::project_results;

    fn question(id: &str, category: &str) -> Question {
        Question {
            question_id: id.into(),
            question: "q".into(),
            category: category.into(),
            weight: 1,
        }
    }

    fn two_question_row() -> AssessmentRow {
        AssessmentRow::new(
            Uuid::new_v4(),
            AssessmentType::Skills,
            vec![question("s1", "technical"), question("s2", "analytical")],
        )
    }

    #[test]
    fn starting_twice_resumes_the_same_assessment() {
        let profile = Uuid::new_v4();
        let first = match resume_or_create(profile, AssessmentType::Skills, None) {
            StartOutcome::Created(row) => row,
            StartOutcome::Resumed(_) => panic!("nothing open to resume"),
        };
        match resume_or_create(profile, AssessmentType::Skills, Some(first.clone())) {
            StartOutcome::Resumed(row) => assert_eq!(row.id, first.id),
            StartOutcome::Created(_) => panic!("expected a resume, got a new row"),
        }
    }

    #[test]
    fn created_rows_use_the_type_template() {
        let StartOutcome::Created(row) =
            resume_or_create(Uuid::new_v4(), AssessmentType::Personality, None)
        else {
            panic!("expected a new row");
        };
        assert_eq!(
            row.questions.0.len(),
            question_set(AssessmentType::Personality).len()
        );
        assert_eq!(row.status, "in-progress");
        assert!(row.responses.0.is_empty());
    }

    #[test]
    fn resume_payload_carries_summary_and_questions() {
        let row = two_question_row();
        let (status, body) = resume_response(row.clone());
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.0["assessment"]["id"], json!(row.id));
        assert_eq!(body.0["questions"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn two_question_walkthrough_reaches_completion() {
        let mut row = two_question_row();
        assert!(row.responses.0.len() < row.questions.0.len());

        row.upsert_response("s1", json!(4), Utc::now()).unwrap();
        assert_eq!(row.completion_percentage(), 50);
        row.upsert_response("s2", json!(2), Utc::now()).unwrap();
        assert_eq!(row.completion_percentage(), 100);
        assert_eq!(row.responses.0.len(), row.questions.0.len());

        let ty = AssessmentType::parse(&row.assessment_type).unwrap();
        let results = project_results(ty, &row.questions.0, &row.responses.0);
        let now = Utc::now();
        let summary = AssessmentResultsSummary {
            personality_type: Some(results.personality_type.clone()),
            learning_style: Some(results.learning_style.primary.clone()),
            work_style: Some(results.work_style.preferred.clone()),
            strengths: results.strengths.clone(),
            areas_for_improvement: results.areas_for_improvement.clone(),
            last_assessment_date: Some(now),
        };

        assert!(!results.skills_profile.is_empty());
        assert_eq!(summary.last_assessment_date, Some(now));
        assert!(summary.personality_type.is_some());
    }
}
