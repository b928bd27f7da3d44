use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::ai::LearningPathSeed;
use crate::auth::CurrentUser;
use crate::career::models::{CareerPathRow, CATEGORIES, INDUSTRIES};
use crate::errors::{AppError, FieldError};
use crate::profile::models::SalaryExpectation;
use crate::profile::validation;
use crate::state::AppState;

/// GET /api/career/recommendations
///
/// Personalized recommendations need a completed assessment on file; without
/// one the model has nothing to anchor on.
pub async fn handle_recommendations(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, AppError> {
    if user.assessment_results.0.personality_type.is_none() {
        return Err(AppError::Conflict(
            "Please complete an assessment first to get personalized recommendations".to_string(),
        ));
    }

    let outcome = state.ai.career_recommendations(&user).await;
    if outcome.degraded {
        tracing::warn!("career recommendations for {} degraded to defaults", user.id);
    }

    Ok(Json(json!({
        "recommendations": outcome.data,
        "aiDegraded": outcome.degraded,
        "userProfile": {
            "name": user.name,
            "education": user.education,
            "interests": user.interests,
            "skills": user.skills,
            "assessmentResults": user.assessment_results,
        },
    })))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PathsQuery {
    pub industry: Option<String>,
    pub category: Option<String>,
    pub education: Option<String>,
    pub demand: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

fn validate_filters(query: &PathsQuery) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if let Some(industry) = &query.industry {
        errors.extend(validation::validate_enum("industry", industry, INDUSTRIES));
    }
    if let Some(category) = &query.category {
        errors.extend(validation::validate_enum("category", category, CATEGORIES));
    }
    errors
}

/// LIMIT/OFFSET arithmetic in i64 so an absurd page number cannot overflow.
fn page_offset(page: u32, limit: u32) -> i64 {
    (i64::from(page.max(1)) - 1) * i64::from(limit)
}

fn append_filters<'a>(builder: &mut QueryBuilder<'a, Postgres>, query: &'a PathsQuery) {
    builder.push(" WHERE is_active = TRUE");
    if let Some(industry) = &query.industry {
        builder.push(" AND industry = ").push_bind(industry);
    }
    if let Some(category) = &query.category {
        builder.push(" AND category = ").push_bind(category);
    }
    if let Some(education) = &query.education {
        builder
            .push(" AND education_requirements->>'minimum' = ")
            .push_bind(education);
    }
    if let Some(demand) = &query.demand {
        builder
            .push(" AND growth_prospects->>'marketDemand' = ")
            .push_bind(demand);
    }
}

/// GET /api/career/paths
pub async fn handle_paths(
    State(state): State<AppState>,
    Query(query): Query<PathsQuery>,
) -> Result<Json<Value>, AppError> {
    let errors = validate_filters(&query);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let offset = page_offset(page, limit);

    let mut count_builder: QueryBuilder<Postgres> =
        QueryBuilder::new("SELECT COUNT(*) FROM career_paths");
    append_filters(&mut count_builder, &query);
    let total: i64 = count_builder
        .build_query_scalar()
        .fetch_one(&state.db)
        .await?;

    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM career_paths");
    append_filters(&mut builder, &query);
    builder.push(
        " ORDER BY CASE growth_prospects->>'marketDemand'
            WHEN 'high' THEN 0 WHEN 'medium' THEN 1 ELSE 2 END,
          created_at DESC",
    );
    builder.push(" LIMIT ").push_bind(limit as i64);
    builder.push(" OFFSET ").push_bind(offset);

    let rows: Vec<CareerPathRow> = builder.build_query_as().fetch_all(&state.db).await?;
    let pages = (total as u32).div_ceil(limit);

    Ok(Json(json!({
        "careers": rows.iter().map(CareerPathRow::summary).collect::<Vec<_>>(),
        "pagination": {
            "current": page,
            "pages": pages,
            "total": total,
        },
    })))
}

/// GET /api/career/paths/:id
pub async fn handle_path_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let row = fetch_career(&state, id).await?;
    Ok(Json(json!({ "career": row })))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// GET /api/career/search
pub async fn handle_search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, AppError> {
    let term = query.q.trim();
    if term.len() < 2 {
        return Err(AppError::invalid(
            "q",
            "Search query must be at least 2 characters",
        ));
    }

    let pattern = format!("%{term}%");
    let rows = sqlx::query_as::<_, CareerPathRow>(
        "SELECT * FROM career_paths
         WHERE is_active = TRUE AND (title ILIKE $1 OR description ILIKE $1)
         ORDER BY title
         LIMIT 20",
    )
    .bind(&pattern)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(json!({
        "query": term,
        "results": rows.iter().map(CareerPathRow::summary).collect::<Vec<_>>(),
    })))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InsightsQuery {
    pub industry: Option<String>,
    pub location: Option<String>,
}

/// GET /api/career/market-insights
pub async fn handle_market_insights(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<InsightsQuery>,
) -> Result<Json<Value>, AppError> {
    let industry = query
        .industry
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::invalid("industry", "Industry is required"))?;
    let location = query
        .location
        .unwrap_or_else(|| format!("{}, {}", user.location_city, user.location_state));

    let outcome = state.ai.market_insights(industry, &location).await;

    Ok(Json(json!({
        "industry": industry,
        "location": location,
        "insights": outcome.data,
        "aiDegraded": outcome.degraded,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    pub career_ids: Vec<Uuid>,
}

/// POST /api/career/compare
pub async fn handle_compare(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Json(req): Json<CompareRequest>,
) -> Result<Json<Value>, AppError> {
    if req.career_ids.len() < 2 || req.career_ids.len() > 4 {
        return Err(AppError::invalid(
            "careerIds",
            "Select between 2 and 4 careers to compare",
        ));
    }

    let rows = sqlx::query_as::<_, CareerPathRow>(
        "SELECT * FROM career_paths WHERE id = ANY($1) AND is_active = TRUE",
    )
    .bind(&req.career_ids)
    .fetch_all(&state.db)
    .await?;

    if rows.len() != req.career_ids.len() {
        return Err(AppError::Conflict(
            "One or more career paths not found".to_string(),
        ));
    }

    Ok(Json(build_comparison(&rows)))
}

/// GET /api/career/paths/:id/learning
pub async fn handle_learning(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let career = fetch_career(&state, id).await?;

    let seed = LearningPathSeed {
        required_skills: career
            .skills
            .0
            .technical
            .iter()
            .map(|s| s.skill.clone())
            .collect(),
        current_skills: user.skills.0.iter().map(|s| s.name.clone()).collect(),
        time_commitment: None,
        budget: None,
    };
    let outcome = state.ai.learning_path(&user, &career.title, &seed).await;

    Ok(Json(json!({
        "career": career.summary(),
        "catalogPath": career.learning_path,
        "learningPath": outcome.data,
        "aiDegraded": outcome.degraded,
    })))
}

#[derive(Debug, sqlx::FromRow)]
struct IndustryStat {
    industry: String,
    count: i64,
    avg_entry_salary: Option<f64>,
}

#[derive(Debug, sqlx::FromRow)]
struct DemandStat {
    demand: Option<String>,
    count: i64,
}

/// GET /api/career/stats
pub async fn handle_stats(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM career_paths WHERE is_active = TRUE")
            .fetch_one(&state.db)
            .await?;

    let by_industry = sqlx::query_as::<_, IndustryStat>(
        "SELECT industry,
                COUNT(*) AS count,
                AVG((experience->'entryLevel'->'salaryRange'->>'min')::numeric)::float8
                    AS avg_entry_salary
         FROM career_paths
         WHERE is_active = TRUE
         GROUP BY industry
         ORDER BY count DESC",
    )
    .fetch_all(&state.db)
    .await?;

    let by_demand = sqlx::query_as::<_, DemandStat>(
        "SELECT growth_prospects->>'marketDemand' AS demand, COUNT(*) AS count
         FROM career_paths
         WHERE is_active = TRUE
         GROUP BY growth_prospects->>'marketDemand'",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(Json(json!({
        "total": total,
        "byIndustry": by_industry
            .iter()
            .map(|s| json!({
                "industry": s.industry,
                "count": s.count,
                "avgEntrySalary": s.avg_entry_salary,
            }))
            .collect::<Vec<_>>(),
        "byDemand": by_demand
            .iter()
            .map(|s| json!({
                "demand": s.demand.as_deref().unwrap_or("unknown"),
                "count": s.count,
            }))
            .collect::<Vec<_>>(),
    })))
}

async fn fetch_career(state: &AppState, id: Uuid) -> Result<CareerPathRow, AppError> {
    sqlx::query_as::<_, CareerPathRow>(
        "SELECT * FROM career_paths WHERE id = $1 AND is_active = TRUE",
    )
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("Career path not found".to_string()))
}

/// Side-by-side comparison. Skills shared by more than one career surface as
/// common ground; the salary envelope spans all entry bands.
fn build_comparison(careers: &[CareerPathRow]) -> Value {
    let mut skill_counts: HashMap<&str, usize> = HashMap::new();
    for career in careers {
        for skill in &career.skills.0.technical {
            *skill_counts.entry(skill.skill.as_str()).or_default() += 1;
        }
    }
    let mut common: Vec<(&str, usize)> = skill_counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .collect();
    common.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    let common_skills: Vec<&str> = common.into_iter().map(|(s, _)| s).collect();

    let entry_bands: Vec<&SalaryExpectation> = careers
        .iter()
        .map(|c| &c.experience.0.entry_level.salary_range)
        .collect();
    let salary_envelope = json!({
        "min": entry_bands.iter().map(|s| s.min).min().unwrap_or(0),
        "max": entry_bands.iter().map(|s| s.max).max().unwrap_or(0),
        "currency": entry_bands
            .first()
            .map(|s| s.currency.as_str())
            .unwrap_or("INR"),
    });

    json!({
        "careers": careers.iter().map(|c| json!({
            "id": c.id,
            "title": c.title,
            "industry": c.industry,
            "category": c.category,
            "educationRequired": c.education_requirements.0.minimum,
            "marketDemand": c.growth_prospects.0.market_demand,
            "entryLevelSalary": c.experience.0.entry_level.salary_range,
            "topSkills": c.skills.0.technical.iter().take(5)
                .map(|s| s.skill.as_str()).collect::<Vec<_>>(),
        })).collect::<Vec<_>>(),
        "commonSkills": common_skills,
        "entrySalaryEnvelope": salary_envelope,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::career::models::{
        CareerSkills, EducationRequirements, ExperienceBands, GrowthProspects, RegionalContext,
        TechnicalSkill, WorkEnvironmentInfo,
    };
    use chrono::Utc;
    use sqlx::types::Json as Db;

    fn career(title: &str, skills: &[&str], min: i64, max: i64) -> CareerPathRow {
        let now = Utc::now();
        let mut experience = ExperienceBands::default();
        experience.entry_level.salary_range.min = min;
        experience.entry_level.salary_range.max = max;
        CareerPathRow {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            industry: "technology".to_string(),
            category: "engineering".to_string(),
            education_requirements: Db(EducationRequirements::default()),
            skills: Db(CareerSkills {
                technical: skills
                    .iter()
                    .map(|s| TechnicalSkill {
                        skill: s.to_string(),
                        importance: "high".to_string(),
                        level: None,
                    })
                    .collect(),
                ..CareerSkills::default()
            }),
            experience: Db(experience),
            growth_prospects: Db(GrowthProspects::default()),
            work_environment: Db(WorkEnvironmentInfo::default()),
            certifications: Db(Vec::new()),
            learning_path: Db(Vec::new()),
            regional_context: Db(RegionalContext::default()),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn page_offset_never_overflows() {
        assert_eq!(page_offset(1, 20), 0);
        assert_eq!(page_offset(0, 20), 0);
        assert_eq!(page_offset(3, 50), 100);
        assert_eq!(page_offset(u32::MAX, 100), (i64::from(u32::MAX) - 1) * 100);
    }

    #[test]
    fn unknown_filter_values_are_rejected() {
        let query = PathsQuery {
            industry: Some("tech".to_string()),
            category: Some("engineering".to_string()),
            ..PathsQuery::default()
        };
        let errors = validate_filters(&query);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "industry");

        let valid = PathsQuery {
            industry: Some("technology".to_string()),
            ..PathsQuery::default()
        };
        assert!(validate_filters(&valid).is_empty());
    }

    #[test]
    fn comparison_surfaces_shared_skills() {
        let a = career("Software Developer", &["Python", "SQL", "Git"], 400_000, 800_000);
        let b = career("Data Analyst", &["Python", "SQL", "Excel"], 350_000, 700_000);
        let out = build_comparison(&[a, b]);
        let common = out["commonSkills"].as_array().unwrap();
        assert_eq!(common.len(), 2);
        assert!(common.contains(&json!("Python")));
        assert!(common.contains(&json!("SQL")));
    }

    #[test]
    fn comparison_salary_envelope_spans_entry_bands() {
        let a = career("A", &["X"], 400_000, 800_000);
        let b = career("B", &["Y"], 350_000, 900_000);
        let out = build_comparison(&[a, b]);
        assert_eq!(out["entrySalaryEnvelope"]["min"], json!(350_000));
        assert_eq!(out["entrySalaryEnvelope"]["max"], json!(900_000));
        assert_eq!(out["entrySalaryEnvelope"]["currency"], json!("INR"));
    }

    #[test]
    fn comparison_with_no_overlap_is_empty() {
        let a = career("A", &["X"], 1, 2);
        let b = career("B", &["Y"], 1, 2);
        let out = build_comparison(&[a, b]);
        assert!(out["commonSkills"].as_array().unwrap().is_empty());
    }
}
