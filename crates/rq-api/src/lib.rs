use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::header::{HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    http::Method,
    http::Request,
    middleware,
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use clap::Parser;
use dotenvy::dotenv;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;

pub mod error;
pub mod handlers;
pub mod submit;

use error::ApiError;
use handlers::{health, matches, requirements};
use submit::EvaluatorClient;

const SHUTDOWN_DRAIN_GRACE: std::time::Duration = std::time::Duration::from_millis(200);

#[derive(Debug, Clone, Parser)]
#[command(name = "rq-api", about = "HTTP API for requirement creation and match preview")]
struct Cli {
    /// Server port
    #[arg(long, env = "PORT", default_value_t = 3002)]
    port: u16,

    /// Base URL of the evaluator/submission service
    #[arg(long, env = "RQ_EVALUATOR_URL")]
    evaluator_url: String,

    /// Request timeout for evaluator calls (seconds)
    #[arg(long, env = "RQ_EVALUATOR_TIMEOUT_SECS", default_value_t = 30)]
    evaluator_timeout_secs: u64,

    /// Comma separated list of allowed CORS origins
    #[arg(long, env = "RQ_CORS_ORIGINS", default_value = "http://localhost:3000")]
    cors_origins: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub evaluator_url: String,
    pub evaluator_timeout_secs: u64,
}

impl AppConfig {
    fn from_cli(cli: Cli) -> Result<Self, ApiError> {
        let cors_origins = cli
            .cors_origins
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect::<Vec<_>>();

        if cors_origins.iter().any(|origin| origin == "*") {
            return Err(ApiError::BadRequest(
                "RQ_CORS_ORIGINS must list explicit origins".into(),
            ));
        }

        if cli.evaluator_url.trim().is_empty() {
            return Err(ApiError::BadRequest("RQ_EVALUATOR_URL is required".into()));
        }

        Ok(Self {
            port: cli.port,
            cors_origins,
            evaluator_url: cli.evaluator_url,
            evaluator_timeout_secs: cli.evaluator_timeout_secs,
        })
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub submitter: EvaluatorClient,
    pub readiness: Arc<std::sync::atomic::AtomicBool>,
}

pub type SharedState = Arc<AppState>;

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

async fn attach_request_id_context(req: Request<Body>, next: Next) -> Result<Response, ApiError> {
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string());

    Ok(error::with_request_id(request_id, next.run(req)).await)
}

pub fn create_router(state: SharedState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    let request_id_header = HeaderName::from_static("x-request-id");
    let trace_header = request_id_header.clone();

    let trace = TraceLayer::new_for_http().make_span_with(move |request: &Request<Body>| {
        let request_id = request
            .headers()
            .get(&trace_header)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");

        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    });

    let api_routes = Router::new()
        .route("/requirements", post(requirements::create))
        .route("/requirements/preview", post(requirements::preview))
        .route("/matches/preview", post(matches::preview));

    Router::new()
        .route("/livez", get(health::livez))
        .route("/readyz", get(health::readyz))
        .nest("/api", api_routes)
        .layer(middleware::from_fn(attach_request_id_context))
        .layer(DefaultBodyLimit::max(256 * 1024))
        .layer(trace)
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(
            request_id_header,
            MakeRequestUuid::default(),
        ))
        .layer(cors)
        .with_state(state)
}

pub fn test_state(evaluator_url: &str) -> SharedState {
    let submitter =
        EvaluatorClient::new(evaluator_url.to_string(), 1).expect("client should build");

    Arc::new(AppState {
        config: AppConfig {
            port: 3002,
            cors_origins: vec!["http://localhost:3000".into()],
            evaluator_url: evaluator_url.to_string(),
            evaluator_timeout_secs: 1,
        },
        submitter,
        readiness: Arc::new(std::sync::atomic::AtomicBool::new(true)),
    })
}

pub async fn run() -> Result<(), ApiError> {
    dotenv().ok();
    rq_common::logging::init(env!("CARGO_PKG_NAME"));

    let cli = Cli::parse();
    let config = AppConfig::from_cli(cli)?;
    let submitter = EvaluatorClient::new(
        config.evaluator_url.clone(),
        config.evaluator_timeout_secs,
    )
    .map_err(|err| ApiError::Internal(err.to_string()))?;

    let state = Arc::new(AppState {
        config: config.clone(),
        submitter,
        readiness: Arc::new(std::sync::atomic::AtomicBool::new(true)),
    });

    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    let app = create_router(state.clone());

    info!(%addr, evaluator = %config.evaluator_url, "rq-api listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    Ok(())
}

async fn shutdown_signal(state: SharedState) {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
            let _ = sigterm.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    state
        .readiness
        .store(false, std::sync::atomic::Ordering::SeqCst);

    // Window for load balancers to observe /readyz as not ready before
    // axum stops accepting connections.
    tokio::time::sleep(SHUTDOWN_DRAIN_GRACE).await;
}
