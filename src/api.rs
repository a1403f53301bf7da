// 🌐 REST API - thin adapter over the account registry
//
// Routes:
//   POST /accounts                    create account → 201 {id, balance}
//   GET  /accounts                    list accounts
//   POST /accounts/:id/deposit        {amount} → {balance}
//   POST /accounts/:id/withdraw       {amount} → {balance}
//   GET  /accounts/:id/getbalance     → {balance}
//   GET  /health

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::io;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::entities::{AccountId, AccountRegistry, AccountSnapshot};
use crate::error::AccountError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<AccountRegistry>,
}

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub amount: f64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct BalanceResponse {
    pub balance: f64,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

// ============================================================================
// API Error
// ============================================================================

/// Error returned by handlers: status code plus a message for the body
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            code: "BAD_REQUEST",
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        let status = match err {
            AccountError::NotFound(_) => StatusCode::NOT_FOUND,
            AccountError::InvalidAmount(_) | AccountError::InsufficientFunds { .. } => {
                StatusCode::BAD_REQUEST
            }
        };
        ApiError {
            status,
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message,
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}

fn parse_account_id(raw: &str) -> Result<AccountId, ApiError> {
    raw.parse::<u64>()
        .map(AccountId::new)
        .map_err(|_| ApiError::bad_request("Invalid account ID"))
}

fn parse_amount(body: Result<Json<AmountRequest>, JsonRejection>) -> Result<f64, ApiError> {
    body.map(|Json(request)| request.amount).map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected request body");
        ApiError::bad_request("Invalid request body")
    })
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /health - Health check
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "OK",
        "accounts": state.registry.count(),
    }))
}

/// POST /accounts - Open a new zero-balance account
async fn create_account(State(state): State<AppState>) -> impl IntoResponse {
    let account = state.registry.create_account();
    (StatusCode::CREATED, Json(account.snapshot()))
}

/// GET /accounts - All accounts, sorted by id
async fn list_accounts(State(state): State<AppState>) -> Json<Vec<AccountSnapshot>> {
    Json(state.registry.all_accounts())
}

/// POST /accounts/:id/deposit
async fn deposit(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<AmountRequest>, JsonRejection>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let account = state.registry.lookup(parse_account_id(&raw_id)?)?;
    let amount = parse_amount(body)?;

    let balance = account.deposit(amount)?;
    Ok(Json(BalanceResponse { balance }))
}

/// POST /accounts/:id/withdraw
async fn withdraw(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<AmountRequest>, JsonRejection>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let account = state.registry.lookup(parse_account_id(&raw_id)?)?;
    let amount = parse_amount(body)?;

    let balance = account.withdraw(amount)?;
    Ok(Json(BalanceResponse { balance }))
}

/// GET /accounts/:id/getbalance
async fn get_balance(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let account = state.registry.lookup(parse_account_id(&raw_id)?)?;
    Ok(Json(BalanceResponse {
        balance: account.balance(),
    }))
}

// ============================================================================
// Router
// ============================================================================

/// Build the application router around a shared registry
pub fn router(registry: Arc<AccountRegistry>) -> Router {
    let state = AppState { registry };

    Router::new()
        .route("/health", get(health_check))
        .route("/accounts", post(create_account).get(list_accounts))
        .route("/accounts/:id/deposit", post(deposit))
        .route("/accounts/:id/withdraw", post(withdraw))
        .route("/accounts/:id/getbalance", get(get_balance))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Resolve when `signal` fires; if its handler cannot be installed, never resolve
///
/// Feeds `with_graceful_shutdown`, which would otherwise stop the server as
/// soon as a failed handler returned.
pub async fn wait_for_signal<F>(signal: F, name: &str)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => tracing::info!(signal = name, "shutdown signal received"),
        Err(e) => {
            tracing::error!(signal = name, error = %e, "failed to install signal handler");
            std::future::pending::<()>().await;
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
