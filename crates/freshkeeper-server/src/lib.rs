//! FreshKeeper Web Server
//!
//! Axum-based REST API for the FreshKeeper food expiry tracker.
//!
//! Authentication is expected to happen upstream (reverse proxy). The acting
//! user is read from the `X-FreshKeeper-User` header and created on first use.
//! Every request is recorded in the audit log.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info};

use freshkeeper_core::db::Database;
use freshkeeper_core::models::User;
use freshkeeper_core::ExpiryPredictor;

mod handlers;
mod scheduler;

pub use scheduler::{start_reminder_scheduler, ReminderPassReport, ReminderScheduleConfig};

/// Maximum request body size for JSON endpoints (64 KB)
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Maximum pagination limit
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Header naming the acting household user
pub const USER_HEADER: &str = "x-freshkeeper-user";

/// User assumed when no header is present
pub const DEFAULT_USER: &str = "household";

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
    pub predictor: ExpiryPredictor,
    /// Pinned date for tests; `None` uses the local clock
    pub today: Option<NaiveDate>,
}

impl AppState {
    /// The date all predictions and dashboards are computed against
    pub fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

/// Extract the acting user name from request headers
pub fn get_user_name(headers: &axum::http::HeaderMap) -> String {
    headers
        .get(USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_USER)
        .to_string()
}

/// Resolve the acting user, creating it on first use
pub(crate) fn current_user(
    state: &AppState,
    headers: &axum::http::HeaderMap,
) -> Result<User, AppError> {
    let name = get_user_name(headers);
    Ok(state.db.ensure_user(&name)?)
}

/// Create the application router
///
/// `today` pins the clock (for testing); `None` follows the local date.
pub fn create_router(
    db: Database,
    static_dir: Option<&str>,
    config: ServerConfig,
    predictor: ExpiryPredictor,
    today: Option<NaiveDate>,
) -> Router {
    info!(strategy = predictor.strategy_name(), "Expiry predictor ready");

    let state = Arc::new(AppState {
        db,
        config: config.clone(),
        predictor,
        today,
    });

    let api_routes = Router::new()
        // Items
        .route(
            "/items",
            get(handlers::list_items).post(handlers::create_item),
        )
        .route("/items/:id", get(handlers::get_item))
        .route(
            "/items/:id/status/:status",
            post(handlers::update_item_status),
        )
        // Views
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/analytics", get(handlers::get_analytics))
        .route("/reminders", get(handlers::list_reminders))
        // Engine helpers
        .route("/classify/:days", get(handlers::classify_days))
        .route("/predict", get(handlers::preview_prediction))
        // Reference data
        .route("/tips", get(handlers::list_tips))
        // Audit log
        .route("/audit", get(handlers::list_audit_log));

    // CORS: same-origin unless origins are configured
    let cors = if config.allowed_origins.is_empty() {
        CorsLayer::new()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([
                header::CONTENT_TYPE,
                header::HeaderName::from_static(USER_HEADER),
            ])
    };

    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; frame-ancestors 'none'",
    );

    let mut app = Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ));

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server
///
/// `predictor` is normally built from `ShelfLifeTable::load`, which honours
/// the local override file.
pub async fn serve(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
    predictor: ExpiryPredictor,
) -> anyhow::Result<()> {
    match db.seed_preservation_tips() {
        Ok(count) if count > 0 => info!("Seeded {} preservation tips", count),
        Ok(_) => {}
        Err(e) => error!("Failed to seed preservation tips: {}", e),
    }

    if let Some(reminder_config) = ReminderScheduleConfig::from_env() {
        start_reminder_scheduler(db.clone(), reminder_config);
    }

    let app = create_router(db, static_dir, config, predictor, None);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn conflict(msg: &str) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            internal: Some(err),
        }
    }
}
