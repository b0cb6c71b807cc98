use axum::{
    Router,
    http::{Method, header},
    routing::{delete, get, patch, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use std::sync::Arc;

use crate::expenses;
use engine::Engine;

const WELCOME: &str = "Welcome to the Expense Tracker API!";

/// State shared by every handler. The engine is the only shared resource.
#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

impl ServerState {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

/// Cross-origin policy: any origin, a fixed header allow-list.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT])
}

async fn welcome() -> &'static str {
    WELCOME
}

/// Build the application router. `cors` toggles the cross-origin layer.
pub fn router(state: ServerState, cors: bool) -> Router {
    let api = Router::new()
        .route("/create_expense", post(expenses::create))
        .route("/delete_expense/{id}", delete(expenses::delete))
        .route("/daily_expense", get(expenses::list_by_date))
        .route("/daily_expense/{id}", get(expenses::get))
        .route("/all_daily_expense", get(expenses::list_all))
        .route("/update_expense/{id}", patch(expenses::update));

    let router = Router::new()
        .route("/", get(welcome))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors {
        router.layer(cors_layer())
    } else {
        router
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
    cors: bool,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState::new(engine);

    axum::serve(listener, router(state, cors))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
