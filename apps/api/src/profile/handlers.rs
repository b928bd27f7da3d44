use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::types::Json as Db;

use crate::auth::CurrentUser;
use crate::errors::{AppError, FieldError};
use crate::profile::models::{CareerGoals, Education, Interest, Preferences, ProfileRow, Skill};
use crate::profile::validation;
use crate::state::AppState;

/// GET /api/profile
pub async fn handle_get_profile(CurrentUser(user): CurrentUser) -> Json<Value> {
    Json(json!({ "user": user }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationUpdate {
    pub state: Option<String>,
    pub city: Option<String>,
    pub pincode: Option<String>,
}

/// Allow-listed partial update. Fields absent from the body are untouched;
/// anything outside this set is ignored by construction.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<LocationUpdate>,
    pub education: Option<Education>,
    pub interests: Option<Vec<Interest>>,
    pub skills: Option<Vec<Skill>>,
    pub career_goals: Option<CareerGoals>,
    pub preferences: Option<Preferences>,
}

fn validate_update(req: &UpdateProfileRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if let Some(name) = &req.name {
        errors.extend(validation::validate_name(name));
    }
    if let Some(phone) = &req.phone {
        errors.extend(validation::validate_phone(phone));
    }
    if let Some(location) = &req.location {
        for (field, value) in [
            ("location.state", &location.state),
            ("location.city", &location.city),
        ] {
            if let Some(value) = value {
                if value.trim().is_empty() {
                    errors.push(FieldError::new(field, "Cannot be empty"));
                }
            }
        }
        if let Some(pincode) = &location.pincode {
            errors.extend(validation::validate_pincode(pincode));
        }
    }
    if let Some(education) = &req.education {
        errors.extend(validation::validate_enum(
            "education.currentLevel",
            &education.current_level,
            validation::EDUCATION_LEVELS,
        ));
        if let Some(stream) = &education.stream {
            errors.extend(validation::validate_enum(
                "education.stream",
                stream,
                validation::STREAMS,
            ));
        }
        if let Some(year) = education.year_of_passing {
            errors.extend(validation::validate_year_of_passing(year));
        }
    }
    if let Some(interests) = &req.interests {
        errors.extend(validation::validate_interests(interests));
    }
    if let Some(skills) = &req.skills {
        errors.extend(validation::validate_skills(skills));
    }
    if let Some(goals) = &req.career_goals {
        errors.extend(validation::validate_career_goals(goals));
    }
    if let Some(prefs) = &req.preferences {
        errors.extend(validation::validate_preferences(prefs));
    }
    errors
}

/// PUT /api/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<Value>, AppError> {
    let errors = validate_update(&req);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let location = req.location.unwrap_or_default();

    let updated = sqlx::query_as::<_, ProfileRow>(
        r#"
        UPDATE profiles SET
            name = COALESCE($2, name),
            phone = COALESCE($3, phone),
            location_state = COALESCE($4, location_state),
            location_city = COALESCE($5, location_city),
            location_pincode = COALESCE($6, location_pincode),
            education = COALESCE($7, education),
            interests = COALESCE($8, interests),
            skills = COALESCE($9, skills),
            career_goals = COALESCE($10, career_goals),
            preferences = COALESCE($11, preferences),
            updated_at = NOW()
        WHERE id = $1 AND is_active = TRUE
        RETURNING *
        "#,
    )
    .bind(user.id)
    .bind(req.name.map(|n| n.trim().to_string()))
    .bind(req.phone)
    .bind(location.state)
    .bind(location.city)
    .bind(location.pincode)
    .bind(req.education.map(Db))
    .bind(req.interests.map(Db))
    .bind(req.skills.map(Db))
    .bind(req.career_goals.map(Db))
    .bind(req.preferences.map(Db))
    .fetch_one(&state.db)
    .await?;

    Ok(Json(json!({
        "message": "Profile updated successfully",
        "user": updated,
    })))
}

#[derive(Debug, Deserialize)]
pub struct SkillsRequest {
    pub skills: Vec<Skill>,
}

/// POST /api/profile/skills
pub async fn handle_update_skills(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<SkillsRequest>,
) -> Result<Json<Value>, AppError> {
    let errors = validation::validate_skills(&req.skills);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    sqlx::query("UPDATE profiles SET skills = $2, updated_at = NOW() WHERE id = $1")
        .bind(user.id)
        .bind(Db(&req.skills))
        .execute(&state.db)
        .await?;

    Ok(Json(json!({
        "message": "Skills updated successfully",
        "skills": req.skills,
    })))
}

#[derive(Debug, Deserialize)]
pub struct InterestsRequest {
    pub interests: Vec<Interest>,
}

/// POST /api/profile/interests
pub async fn handle_update_interests(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<InterestsRequest>,
) -> Result<Json<Value>, AppError> {
    let errors = validation::validate_interests(&req.interests);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    sqlx::query("UPDATE profiles SET interests = $2, updated_at = NOW() WHERE id = $1")
        .bind(user.id)
        .bind(Db(&req.interests))
        .execute(&state.db)
        .await?;

    Ok(Json(json!({
        "message": "Interests updated successfully",
        "interests": req.interests,
    })))
}

/// POST /api/profile/career-goals
pub async fn handle_update_career_goals(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(goals): Json<CareerGoals>,
) -> Result<Json<Value>, AppError> {
    let errors = validation::validate_career_goals(&goals);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    sqlx::query("UPDATE profiles SET career_goals = $2, updated_at = NOW() WHERE id = $1")
        .bind(user.id)
        .bind(Db(&goals))
        .execute(&state.db)
        .await?;

    Ok(Json(json!({
        "message": "Career goals updated successfully",
        "careerGoals": goals,
    })))
}

/// POST /api/profile/preferences
pub async fn handle_update_preferences(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(prefs): Json<Preferences>,
) -> Result<Json<Value>, AppError> {
    let errors = validation::validate_preferences(&prefs);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    sqlx::query("UPDATE profiles SET preferences = $2, updated_at = NOW() WHERE id = $1")
        .bind(user.id)
        .bind(Db(&prefs))
        .execute(&state.db)
        .await?;

    Ok(Json(json!({
        "message": "Preferences updated successfully",
        "preferences": prefs,
    })))
}

/// DELETE /api/profile — soft delete; the row is never removed.
pub async fn handle_deactivate(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, AppError> {
    sqlx::query("UPDATE profiles SET is_active = FALSE, updated_at = NOW() WHERE id = $1")
        .bind(user.id)
        .execute(&state.db)
        .await?;

    tracing::info!("deactivated profile {}", user.id);
    Ok(Json(json!({ "message": "Account deactivated successfully" })))
}
