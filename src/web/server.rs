use axum::{
    extract::{Path, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json, Redirect, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::catalog::store::ChordCatalog;
use crate::cli::ServeArgs;
use crate::core::instrument::InstrumentRegistry;
use crate::core::types::{ChordView, CoreError};
use crate::matching::engine::{SearchEngine, SearchError};
use crate::utils::validation::{validate_instrument, validate_query, ValidationError};
use crate::web::render;

/// Suffix selecting the JSON representation of a query
pub const JSON_SUFFIX: &str = ".json";

/// Maximum number of requests handled at once
pub const MAX_CONCURRENT_REQUESTS: usize = 100;

/// Shared application state
///
/// Read-only after startup, so handlers share it without locking.
pub struct AppState {
    pub registry: InstrumentRegistry,
    pub catalog: ChordCatalog,
    /// Prefix for canonical chord URLs, e.g. `http://127.0.0.1:8080`
    pub base_url: String,
}

impl AppState {
    pub fn new(catalog: ChordCatalog, base_url: impl Into<String>) -> Self {
        Self {
            registry: InstrumentRegistry::with_builtins(),
            catalog,
            base_url: base_url.into(),
        }
    }

    fn engine(&self) -> SearchEngine<'_, ChordCatalog> {
        SearchEngine::new(&self.registry, &self.catalog)
    }
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    // Log detailed error server-side for debugging (not exposed to client)
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None,
    }
}

fn error_response(status: StatusCode, error: ErrorResponse) -> Response {
    (status, Json(error)).into_response()
}

fn validation_error_response(err: &ValidationError) -> Response {
    error_response(
        StatusCode::BAD_REQUEST,
        create_safe_error_response("validation_error", &err.to_string(), None),
    )
}

fn search_error_response(err: &SearchError) -> Response {
    match err {
        SearchError::Core(CoreError::UnknownInstrument(_)) => error_response(
            StatusCode::NOT_FOUND,
            create_safe_error_response("unknown_instrument", &err.to_string(), None),
        ),
        SearchError::Catalog(inner) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            create_safe_error_response(
                "catalog_error",
                "Failed to read chord catalog",
                Some(&inner.to_string()),
            ),
        ),
    }
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created, the catalog
/// cannot be loaded, or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    // Build tokio runtime
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Routes plus security headers, timeout and concurrency limit.
pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/instruments", get(instruments_handler))
        .route("/{instrument}", get(instrument_redirect_handler))
        .route("/{instrument}/", get(instrument_handler))
        .route("/{instrument}/{*query}", get(query_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Security headers for browser protection
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                // Request timeout to prevent slow client attacks
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(30),
                ))
                // Limit concurrent requests to prevent DOS
                .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS)),
        )
}

/// Create the application router with per-IP rate limiting on top.
///
/// Needs connection info, so serve it with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Errors
///
/// Returns an error if the rate limiter configuration is invalid.
pub fn create_router(state: Arc<AppState>) -> anyhow::Result<Router> {
    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50) // Allow bursts of 50 requests
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?;

    Ok(create_app(state).layer(GovernorLayer {
        config: Arc::new(governor_conf),
    }))
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let catalog = ChordCatalog::load(args.catalog.as_deref())?;
    let addr = format!("{}:{}", args.address, args.port);
    let base_url = args
        .base_url
        .clone()
        .unwrap_or_else(|| format!("http://{addr}"));

    let state = Arc::new(AppState::new(catalog, base_url));
    tracing::info!(
        chords = state.catalog.len(),
        base_url = %state.base_url,
        "Loaded chord catalog"
    );
    let app = create_router(state)?;

    println!("Starting chord-search web server at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Main page handler
async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render::render_index(&state.registry))
}

/// `/guitar` -> `/guitar/`
async fn instrument_redirect_handler(Path(instrument): Path<String>) -> Response {
    match validate_instrument(&instrument) {
        Ok(instrument) => Redirect::to(&format!("/{instrument}/")).into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Empty search page for an instrument
async fn instrument_handler(
    State(state): State<Arc<AppState>>,
    Path(instrument): Path<String>,
) -> Response {
    let Some(profile) = state.registry.get(&instrument) else {
        tracing::debug!(instrument = %instrument, "Unknown instrument, redirecting home");
        return Redirect::to("/").into_response();
    };
    Html(render::render_search(profile, &state.base_url, "", None)).into_response()
}

/// Ranked chords for a query, as HTML or (with a `.json` suffix) JSON
async fn query_handler(
    State(state): State<Arc<AppState>>,
    Path((instrument, query)): Path<(String, String)>,
) -> Response {
    if let Err(err) = validate_instrument(&instrument).and_then(|_| validate_query(&query)) {
        return validation_error_response(&err);
    }

    match query.strip_suffix(JSON_SUFFIX) {
        Some(query) => json_search(&state, &instrument, query),
        None => html_search(&state, &instrument, &query),
    }
}

fn json_search(state: &AppState, instrument: &str, query: &str) -> Response {
    let start_time = std::time::Instant::now();
    match state.engine().find_chords(instrument, query) {
        Ok(results) => {
            let views: Vec<ChordView> = results
                .fingerings()
                .map(|f| f.to_view(&state.base_url))
                .collect();
            tracing::debug!(
                instrument,
                query,
                results = views.len(),
                elapsed = ?start_time.elapsed(),
                "JSON search"
            );
            Json(views).into_response()
        }
        Err(err) => search_error_response(&err),
    }
}

fn html_search(state: &AppState, instrument: &str, query: &str) -> Response {
    match state.engine().find_chords(instrument, query) {
        Ok(results) => {
            tracing::debug!(instrument, query, results = results.chords.len(), "HTML search");
            Html(render::render_search(
                &results.profile,
                &state.base_url,
                query,
                Some(&results),
            ))
            .into_response()
        }
        Err(SearchError::Core(CoreError::UnknownInstrument(_))) => {
            Redirect::to("/").into_response()
        }
        Err(err) => search_error_response(&err),
    }
}

#[derive(Serialize)]
struct InstrumentInfo<'a> {
    name: &'a str,
    strings: &'a [String],
    modifiers: &'a [String],
    chord_count: usize,
}

/// Return list of registered instruments
async fn instruments_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let instruments: Vec<InstrumentInfo<'_>> = state
        .registry
        .profiles()
        .map(|p| InstrumentInfo {
            name: &p.name,
            strings: &p.strings,
            modifiers: &p.modifiers,
            chord_count: state.catalog.records(&p.name).len(),
        })
        .collect();

    Json(serde_json::json!({
        "count": instruments.len(),
        "instruments": instruments,
    }))
}
