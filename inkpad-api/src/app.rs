/// Application state and router builder
///
/// Defines the shared application state and builds the Axum router with all
/// routes and middleware.
///
/// # Example
///
/// ```no_run
/// use inkpad_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = inkpad_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use inkpad_shared::auth::guard::{authenticate, AuthError};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned into each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the token signing secret
    pub fn jwt_secret(&self) -> &str {
        &self.config.auth.jwt_secret
    }

    /// Gets the name of the header carrying the identity token
    pub fn token_header(&self) -> &str {
        &self.config.auth.token_header
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                          # Health check (public)
/// └── /api/
///     ├── /auth/
///     │   ├── POST   /create-user      # public
///     │   ├── POST   /login            # public
///     │   ├── POST   /get-user         # token required
///     │   ├── GET    /fetch-all-users  # token required
///     │   ├── GET    /fetch-user/:id   # token required
///     │   ├── PUT    /update-user/:id  # token required
///     │   └── DELETE /delete-user/:id  # token required
///     └── /notes/                      # token required throughout
///         ├── GET    /fetch-all-notes
///         ├── POST   /add-note
///         ├── PUT    /update-note/:id
///         └── DELETE /delete-note/:id
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Request tracing (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer, origins from configuration)
/// 3. Token guard (per-route-group)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Registration and login are the only unauthenticated API routes
    let public_auth_routes = Router::new()
        .route("/create-user", post(routes::auth::create_user))
        .route("/login", post(routes::auth::login));

    // Everything else under /api/auth requires a verified token
    let protected_auth_routes = Router::new()
        .route("/get-user", post(routes::auth::get_user))
        .route("/fetch-all-users", get(routes::auth::fetch_all_users))
        .route("/fetch-user/:id", get(routes::auth::fetch_user))
        .route("/update-user/:id", put(routes::auth::update_user))
        .route("/delete-user/:id", delete(routes::auth::delete_user))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            token_guard_layer,
        ));

    // Note routes all operate on the authenticated identity
    let notes_routes = Router::new()
        .route("/fetch-all-notes", get(routes::notes::fetch_all_notes))
        .route("/add-note", post(routes::notes::add_note))
        .route("/update-note/:id", put(routes::notes::update_note))
        .route("/delete-note/:id", delete(routes::notes::delete_note))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            token_guard_layer,
        ));

    let api_routes = Router::new()
        .nest("/auth", public_auth_routes.merge(protected_auth_routes))
        .nest("/notes", notes_routes);

    let cors = build_cors_layer(&state);

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Configures CORS from the allowed-origins list
///
/// A literal "*" in the list means permissive mode (development). Otherwise
/// only the configured origins are allowed, with credentials, and the token
/// header is explicitly allowed so browsers can send it cross-origin.
fn build_cors_layer(state: &AppState) -> CorsLayer {
    if state.config.api.cors_origins.contains(&"*".to_string()) {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = state
        .config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let mut allow_headers = vec![header::CONTENT_TYPE];
    if let Ok(token_header) = HeaderName::from_bytes(state.token_header().as_bytes()) {
        allow_headers.push(token_header);
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(allow_headers)
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// Token guard middleware layer
///
/// Reads the configured token header, verifies the token, and injects the
/// resolved identity into request extensions. No store access happens
/// here: a token either projects to an identity or the request ends with
/// 401.
async fn token_guard_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header_value = req
        .headers()
        .get(state.token_header())
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_owned());

    let auth = authenticate(header_value.as_deref(), state.jwt_secret())?;

    req.extensions_mut().insert(auth);

    Ok(next.run(req).await)
}
