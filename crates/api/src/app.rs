//! Application state and router assembly.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post, put},
    Router,
};
use sqlx::PgPool;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    self, require_admin_web, require_auth, require_student_mobile,
};
use crate::routes;
use crate::services::EmailService;
use shared::jwt::JwtConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: JwtConfig,
    pub email: EmailService,
}

impl AppState {
    pub fn new(config: Arc<Config>, pool: PgPool) -> Self {
        let jwt = JwtConfig::new(
            &config.jwt.secret,
            config.jwt.token_expiry_secs,
            config.jwt.leeway_secs,
        );
        let email = EmailService::new(config.email.clone());

        Self {
            pool,
            config,
            jwt,
            email,
        }
    }
}

/// Build the application router with all routes and middleware.
pub fn create_app(config: Arc<Config>, pool: PgPool) -> Router {
    let state = AppState::new(config.clone(), pool);

    let cors = build_cors(&config);

    // Unauthenticated surface: probes, discovery, and the login/signup flows.
    let public_routes = Router::new()
        .route("/api/health", get(routes::health::health_check))
        .route("/api/health/live", get(routes::health::live))
        .route("/api/health/ready", get(routes::health::ready))
        .route("/metrics", get(middleware::metrics_handler))
        .route("/api/colleges", get(routes::colleges::list_colleges))
        .route("/api/events/:id", get(routes::events::get_event))
        .route("/api/events/:id/capacity", get(routes::events::event_capacity))
        .route("/api/auth/admin/login", post(routes::auth::admin_login))
        .route("/api/auth/student/register", post(routes::auth::student_register))
        .route("/api/auth/student/login", post(routes::auth::student_login))
        .route(
            "/api/auth/student/resend-verification",
            post(routes::auth::resend_verification),
        )
        // Aliases kept for the mobile client's original paths.
        .route("/api/students/register", post(routes::auth::student_register))
        .route("/api/students/login", post(routes::auth::student_login));

    let me_routes = Router::new()
        .route("/api/auth/me", get(routes::auth::me))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    // Admin dashboard surface (web tokens only).
    let admin_routes = Router::new()
        .route("/api/colleges", post(routes::colleges::create_college))
        .route(
            "/api/colleges/:id",
            get(routes::colleges::get_college)
                .put(routes::colleges::update_college)
                .delete(routes::colleges::delete_college),
        )
        .route(
            "/api/events",
            post(routes::events::create_event).get(routes::events::list_events),
        )
        .route(
            "/api/events/:id",
            put(routes::events::update_event).delete(routes::events::delete_event),
        )
        .route("/api/events/:id/cancel", put(routes::events::cancel_event))
        .route(
            "/api/events/:id/send-feedback-reminders",
            post(routes::events::send_feedback_reminders),
        )
        .route(
            "/api/students",
            post(routes::students::create_student).get(routes::students::list_students),
        )
        .route(
            "/api/students/:id",
            get(routes::students::get_student).delete(routes::students::delete_student),
        )
        .route(
            "/api/students/:id/verify",
            patch(routes::students::verify_student),
        )
        .route(
            "/api/students/:id/resend-verification",
            post(routes::students::resend_verification),
        )
        .route(
            "/api/registrations/event/:event_id",
            get(routes::registrations::list_by_event),
        )
        .route(
            "/api/registrations/student/:student_id",
            get(routes::registrations::list_by_student),
        )
        .route(
            "/api/registrations/:id",
            get(routes::registrations::get_registration)
                .delete(routes::registrations::cancel_registration),
        )
        .route("/api/attendance", post(routes::attendance::mark_attendance))
        .route(
            "/api/attendance/bulk",
            post(routes::attendance::bulk_mark_attendance),
        )
        .route(
            "/api/attendance/event/:event_id",
            get(routes::attendance::list_by_event),
        )
        .route(
            "/api/attendance/student/:student_id",
            get(routes::attendance::list_by_student),
        )
        .route(
            "/api/attendance/:id",
            delete(routes::attendance::delete_attendance),
        )
        .route("/api/feedback", post(routes::feedback::submit_feedback))
        .route(
            "/api/feedback/event/:event_id",
            get(routes::feedback::list_by_event),
        )
        .route(
            "/api/feedback/:id/stats",
            get(routes::feedback::feedback_stats),
        )
        .route(
            "/api/feedback/:id",
            put(routes::feedback::update_feedback).delete(routes::feedback::delete_feedback),
        )
        .route(
            "/api/reports/event-popularity",
            get(routes::reports::event_popularity),
        )
        .route(
            "/api/reports/student-participation",
            get(routes::reports::student_participation),
        )
        .route(
            "/api/reports/top-active-students",
            get(routes::reports::top_active_students),
        )
        .route(
            "/api/reports/attendance-percentage",
            get(routes::reports::attendance_percentages),
        )
        .route(
            "/api/reports/average-feedback",
            get(routes::reports::average_feedback),
        )
        .route(
            "/api/reports/overall-stats",
            get(routes::reports::overall_stats),
        )
        .route_layer(from_fn_with_state(state.clone(), require_admin_web));

    // Student mobile surface (student tokens only).
    let student_routes = Router::new()
        .route(
            "/api/registrations",
            post(routes::registrations::create_registration),
        )
        .route("/api/students/me/events", get(routes::students::my_events))
        .route(
            "/api/students/events/:id/register",
            post(routes::students::register_for_event),
        )
        .route(
            "/api/students/events/:id/attendance",
            post(routes::students::mark_my_attendance),
        )
        .route(
            "/api/students/events/:id/feedback",
            post(routes::students::submit_my_feedback),
        )
        .route_layer(from_fn_with_state(state.clone(), require_student_mobile));

    Router::new()
        .merge(public_routes)
        .merge(me_routes)
        .merge(admin_routes)
        .merge(student_routes)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(axum::middleware::from_fn(middleware::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(middleware::trace_id))
        .layer(cors)
        .with_state(state)
}

/// CORS policy from configuration; an empty origin list means allow-all
/// (development).
fn build_cors(config: &Config) -> CorsLayer {
    let origins = &config.security.cors_origins;

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(parsed))
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
    }
}
