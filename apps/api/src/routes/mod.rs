pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assessment::handlers as assessment;
use crate::auth::handlers as auth;
use crate::career::handlers as career;
use crate::profile::handlers as profile;
use crate::skills::handlers as skills;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/auth/register", post(auth::handle_register))
        .route("/api/auth/login", post(auth::handle_login))
        // Profile
        .route(
            "/api/profile",
            get(profile::handle_get_profile)
                .put(profile::handle_update_profile)
                .delete(profile::handle_deactivate),
        )
        .route("/api/profile/skills", post(profile::handle_update_skills))
        .route(
            "/api/profile/interests",
            post(profile::handle_update_interests),
        )
        .route(
            "/api/profile/career-goals",
            post(profile::handle_update_career_goals),
        )
        .route(
            "/api/profile/preferences",
            post(profile::handle_update_preferences),
        )
        // Assessments
        .route(
            "/api/assessment/available",
            get(assessment::handle_available),
        )
        .route("/api/assessment/start", post(assessment::handle_start))
        .route("/api/assessment/history", get(assessment::handle_history))
        .route(
            "/api/assessment/:id/response",
            post(assessment::handle_response),
        )
        .route(
            "/api/assessment/:id/complete",
            post(assessment::handle_complete),
        )
        .route(
            "/api/assessment/:id/results",
            get(assessment::handle_results),
        )
        // Careers
        .route(
            "/api/career/recommendations",
            get(career::handle_recommendations),
        )
        .route("/api/career/paths", get(career::handle_paths))
        .route("/api/career/paths/:id", get(career::handle_path_detail))
        .route(
            "/api/career/paths/:id/learning",
            get(career::handle_learning),
        )
        .route("/api/career/search", get(career::handle_search))
        .route(
            "/api/career/market-insights",
            get(career::handle_market_insights),
        )
        .route("/api/career/compare", post(career::handle_compare))
        .route("/api/career/stats", get(career::handle_stats))
        // Skills
        .route("/api/skills/gap-analysis", get(skills::handle_gap_analysis))
        .route(
            "/api/skills/learning-path",
            post(skills::handle_learning_path),
        )
        .route(
            "/api/skills/recommendations",
            get(skills::handle_recommendations),
        )
        .route("/api/skills/progress", post(skills::handle_progress))
        .route(
            "/api/skills/roadmap/:skillName",
            get(skills::handle_roadmap),
        )
        .route("/api/skills/trending", get(skills::handle_trending))
        .route(
            "/api/skills/assessment/:skillName",
            get(skills::handle_quiz_questions).post(skills::handle_quiz_submit),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::ai::AiService;
    use crate::config::Config;

    // Lazy pool: routes that reach the database fail there with a 500, which
    // is still distinguishable from the 401 an auth guard produces.
    fn test_state() -> AppState {
        AppState {
            db: sqlx::PgPool::connect_lazy("postgres://localhost/disha").unwrap(),
            ai: Arc::new(AiService::disabled()),
            config: Config {
                database_url: String::new(),
                database_pool_size: 5,
                jwt_secret: "test-secret".to_string(),
                port: 0,
                rust_log: "info".to_string(),
                ai_project_id: None,
                ai_location: "us-central1".to_string(),
                ai_model: "gemini-1.5-pro".to_string(),
                ai_access_token: None,
            },
        }
    }

    async fn get_status(path: &str) -> StatusCode {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        response.status()
    }

    #[tokio::test]
    async fn health_is_public() {
        assert_eq!(get_status("/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn assessment_catalog_requires_auth() {
        assert_eq!(
            get_status("/api/assessment/available").await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn career_browsing_is_public() {
        // These reject in validation, which only runs past any auth guard.
        assert_eq!(
            get_status("/api/career/search?q=a").await,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status("/api/career/paths?industry=bogus").await,
            StatusCode::BAD_REQUEST
        );
        assert_ne!(
            get_status("/api/career/stats").await,
            StatusCode::UNAUTHORIZED
        );
        assert_ne!(
            get_status("/api/career/paths").await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn personalized_routes_require_auth() {
        for path in [
            "/api/profile",
            "/api/assessment/history",
            "/api/career/recommendations",
            "/api/skills/recommendations",
        ] {
            assert_eq!(
                get_status(path).await,
                StatusCode::UNAUTHORIZED,
                "{path} should demand a bearer token"
            );
        }
    }
}
