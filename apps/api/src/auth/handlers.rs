use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json as Db;

use crate::auth::{hash_password, issue_token, verify_password};
use crate::errors::{AppError, FieldError};
use crate::profile::models::{
    AssessmentResultsSummary, CareerGoals, Education, Interest, Preferences, ProfileRow, Skill,
};
use crate::profile::validation;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LocationInput {
    pub state: String,
    pub city: String,
    #[serde(default)]
    pub pincode: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub location: LocationInput,
    pub education: Education,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: ProfileRow,
}

fn validate_registration(req: &RegisterRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();
    errors.extend(validation::validate_name(&req.name));
    errors.extend(validation::validate_email(&req.email));
    if req.password.chars().count() < 6 {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 6 characters",
        ));
    }
    if let Some(phone) = &req.phone {
        errors.extend(validation::validate_phone(phone));
    }
    errors.extend(validation::validate_enum(
        "gender",
        &req.gender,
        validation::GENDERS,
    ));
    if req.location.state.trim().is_empty() {
        errors.push(FieldError::new("location.state", "State is required"));
    }
    if req.location.city.trim().is_empty() {
        errors.push(FieldError::new("location.city", "City is required"));
    }
    if let Some(pincode) = &req.location.pincode {
        errors.extend(validation::validate_pincode(pincode));
    }
    errors.extend(validation::validate_enum(
        "education.currentLevel",
        &req.education.current_level,
        validation::EDUCATION_LEVELS,
    ));
    if let Some(stream) = &req.education.stream {
        errors.extend(validation::validate_enum(
            "education.stream",
            stream,
            validation::STREAMS,
        ));
    }
    if let Some(year) = req.education.year_of_passing {
        errors.extend(validation::validate_year_of_passing(year));
    }
    errors
}

/// POST /api/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let errors = validate_registration(&req);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let email = req.email.trim().to_lowercase();
    let password_hash = hash_password(&req.password);

    let user = sqlx::query_as::<_, ProfileRow>(
        r#"
        INSERT INTO profiles
            (name, email, password_hash, phone, date_of_birth, gender,
             location_state, location_city, location_pincode, education,
             interests, skills, career_goals, assessment_results, preferences)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        RETURNING *
        "#,
    )
    .bind(req.name.trim())
    .bind(&email)
    .bind(&password_hash)
    .bind(&req.phone)
    .bind(req.date_of_birth)
    .bind(&req.gender)
    .bind(req.location.state.trim())
    .bind(req.location.city.trim())
    .bind(&req.location.pincode)
    .bind(Db(req.education.clone()))
    .bind(Db(Vec::<Interest>::new()))
    .bind(Db(Vec::<Skill>::new()))
    .bind(Db(CareerGoals::default()))
    .bind(Db(AssessmentResultsSummary::default()))
    .bind(Db(Preferences::default()))
    .fetch_one(&state.db)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict("User already exists with this email".to_string())
        }
        _ => AppError::Database(e),
    })?;

    let token = issue_token(user.id, &state.config.jwt_secret)?;
    tracing::info!("registered profile {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "Registration successful".to_string(),
            token,
            user,
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = req.email.trim().to_lowercase();

    let user = sqlx::query_as::<_, ProfileRow>(
        "SELECT * FROM profiles WHERE email = $1 AND is_active = TRUE",
    )
    .bind(&email)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::Unauthorized)?;

    if !verify_password(&req.password, &user.password_hash) {
        return Err(AppError::Unauthorized);
    }

    sqlx::query("UPDATE profiles SET last_login = $2, updated_at = $2 WHERE id = $1")
        .bind(user.id)
        .bind(Utc::now())
        .execute(&state.db)
        .await?;

    let token = issue_token(user.id, &state.config.jwt_secret)?;

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user,
    }))
}
