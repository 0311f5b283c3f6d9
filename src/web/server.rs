use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::cli::ServeArgs;
use crate::core::request::{Boltz2Params, FoldingRequest};
use crate::core::result::FoldResult;
use crate::error::FoldingError;
use crate::folding::FoldingService;

/// Request body limit; sequences are capped at 10k residues and ligands at 500 chars
pub const MAX_REQUEST_BODY_SIZE: usize = 64 * 1024;
/// Upper bound on concurrent folding requests handled by one relay
pub const MAX_CONCURRENT_REQUESTS: usize = 32;
/// Whole-request bound; deferred jobs routinely run for minutes
pub const MAX_REQUEST_DURATION: Duration = Duration::from_secs(30 * 60);

/// Shared application state
pub struct AppState {
    pub service: FoldingService,
}

/// ESMFold request body
#[derive(Debug, Deserialize)]
pub struct EsmfoldBody {
    pub sequence: String,
}

/// Boltz-2 request body; omitted tuning parameters take their defaults
#[derive(Debug, Deserialize)]
pub struct Boltz2Body {
    pub sequence: String,
    #[serde(default)]
    pub ligand_smiles: Option<String>,
    #[serde(default)]
    pub recycling_steps: Option<u32>,
    #[serde(default)]
    pub sampling_steps: Option<u32>,
    #[serde(default)]
    pub diffusion_samples: Option<u32>,
}

impl Boltz2Body {
    fn params(&self) -> Boltz2Params {
        let defaults = Boltz2Params::default();
        Boltz2Params {
            recycling_steps: self.recycling_steps.unwrap_or(defaults.recycling_steps),
            sampling_steps: self.sampling_steps.unwrap_or(defaults.sampling_steps),
            diffusion_samples: self.diffusion_samples.unwrap_or(defaults.diffusion_samples),
        }
    }
}

/// Successful folding response
#[derive(Debug, Serialize, Deserialize)]
pub struct FoldResponse {
    pub results: Vec<FoldResult>,
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<serde_json::Value>,
}

/// Maps folding errors and unreadable request bodies onto HTTP responses
pub enum ApiError {
    Folding(FoldingError),
    /// Body was not JSON or did not match the expected shape
    InvalidBody(JsonRejection),
}

impl From<FoldingError> for ApiError {
    fn from(err: FoldingError) -> Self {
        Self::Folding(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = match self {
            Self::Folding(error) => error,
            Self::InvalidBody(rejection) => {
                tracing::warn!("Rejected request body: {}", rejection.body_text());
                return (
                    rejection.status(),
                    Json(ErrorResponse {
                        error: rejection.body_text(),
                        error_type: "validation_error".to_string(),
                        details: None,
                    }),
                )
                    .into_response();
            }
        };

        // Upstream codes outside the error range (e.g. a 202 without a job id) become 502
        let status = StatusCode::from_u16(error.http_status())
            .ok()
            .filter(|s| s.is_client_error() || s.is_server_error())
            .unwrap_or(StatusCode::BAD_GATEWAY);

        if status.is_server_error() {
            tracing::error!("Protein folding error ({}): {}", error.kind(), error);
        } else {
            tracing::warn!("Protein folding error ({}): {}", error.kind(), error);
        }

        let details = match &error {
            FoldingError::Provider { body, .. } => body.clone(),
            _ => None,
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                error_type: error.kind().to_string(),
                details,
            }),
        )
            .into_response()
    }
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Create the application router with all routes and middleware configured.
///
/// The router needs peer address information for rate limiting; serve it with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Errors
///
/// Returns an error if the rate limiter configuration is rejected.
pub fn create_router(service: FoldingService) -> anyhow::Result<Router> {
    let state = Arc::new(AppState { service });

    // Folding is expensive upstream; keep per-IP submission rates low
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(2)
        .burst_size(10)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?;

    let app = Router::new()
        .route("/api/v1/protein_fold/health", get(health_handler))
        .route("/api/v1/protein_fold/esmfold", post(esmfold_handler))
        .route("/api/v1/protein_fold/boltz2", post(boltz2_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
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
                .layer(GovernorLayer {
                    config: Arc::new(governor_conf),
                })
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    MAX_REQUEST_DURATION,
                ))
                .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
                .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_SIZE)),
        );

    Ok(app)
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let config = args.provider.to_config();
    if config.api_key.is_empty() {
        tracing::warn!("No API key configured; provider requests will be rejected");
    }

    let service = FoldingService::from_config(config)?;
    let app = create_router(service)?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting fold-relay web server at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}/api/v1/protein_fold/health"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "protein_folding",
    }))
}

/// Fold a protein sequence with ESMFold.
///
/// The handler future is dropped when the caller disconnects, which releases the
/// provider connection; the remote job itself keeps running.
async fn esmfold_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<EsmfoldBody>, JsonRejection>,
) -> Result<Json<FoldResponse>, ApiError> {
    let Json(body) = body?;
    let request = FoldingRequest::esmfold(&body.sequence).map_err(FoldingError::from)?;
    let result = state.service.fold(&request).await?;
    Ok(Json(FoldResponse {
        results: vec![result],
    }))
}

/// Predict a protein (and optional ligand) structure with Boltz-2
async fn boltz2_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Boltz2Body>, JsonRejection>,
) -> Result<Json<FoldResponse>, ApiError> {
    let Json(body) = body?;
    let request = FoldingRequest::boltz2(
        &body.sequence,
        body.ligand_smiles.as_deref(),
        body.params(),
    )
    .map_err(FoldingError::from)?;
    let result = state.service.fold(&request).await?;
    Ok(Json(FoldResponse {
        results: vec![result],
    }))
}
