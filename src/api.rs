// 🌐 REST API - axum router over the registry, engine, and validator

use crate::entities::{all_banks, get_bank, resolve_bank_code, weighted_banks, Bank, BankKey};
use crate::error::NubanError;
use crate::nuban::{compute_check_digit, get_possible_issuers, validate_account_number, SERIAL_LENGTH};
use crate::providers::{Provider, ProviderError};
use crate::validator::{ValidationError, Validator};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    validator: Validator,
}

/// API Response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Error → status code + wrapped message
#[derive(Debug)]
pub struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(ApiResponse::<()>::err(self.1))).into_response()
    }
}

impl From<NubanError> for ApiError {
    fn from(err: NubanError) -> Self {
        let status = match err {
            NubanError::UnknownBank(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        };
        ApiError(status, err.to_string())
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        let status = match err {
            ProviderError::UnknownProvider(_) => StatusCode::BAD_REQUEST,
            ProviderError::MissingSecretKey(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::BAD_GATEWAY,
        };
        ApiError(status, err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Nuban(e) => e.into(),
            ValidationError::Provider(e) => e.into(),
        }
    }
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

fn parse_provider(provider: Option<String>) -> Result<Option<Provider>, ApiError> {
    provider
        .filter(|p| !p.trim().is_empty())
        .map(|p| p.parse::<Provider>())
        .transpose()
        .map_err(ApiError::from)
}

// ============================================================================
// Query / response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    weighted: bool,
}

#[derive(Debug, Deserialize)]
pub struct CheckDigitQuery {
    serial: String,
    bank_code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckDigitResponse {
    pub serial: String,
    pub bank_code: String,
    pub check_digit: u8,
    /// Padded serial followed by the check digit
    pub account_number: String,
}

#[derive(Debug, Deserialize)]
pub struct ValidateQuery {
    account_number: String,
    bank_code: String,
    provider: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProviderQuery {
    provider: Option<String>,
}

fn candidates(weighted: bool) -> &'static [Bank] {
    if weighted {
        weighted_banks()
    } else {
        all_banks()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/banks?weighted=true - List the registry
async fn list_banks(Query(query): Query<ListQuery>) -> Json<ApiResponse<&'static [Bank]>> {
    Json(ApiResponse::ok(candidates(query.weighted)))
}

/// GET /api/banks/:slug - Lookup by slug
async fn bank_by_slug(Path(slug): Path<String>) -> ApiResult<Bank> {
    get_bank(&slug, BankKey::Slug)
        .cloned()
        .map(|bank| Json(ApiResponse::ok(bank)))
        .ok_or_else(|| ApiError(StatusCode::NOT_FOUND, format!("Unknown bank slug: {}", slug)))
}

/// GET /api/banks/code/:code - Lookup by 6-digit or legacy 3-digit code
async fn bank_by_code(Path(code): Path<String>) -> ApiResult<Bank> {
    let bank = resolve_bank_code(&code).ok_or(NubanError::UnknownBank(code))?;
    Ok(Json(ApiResponse::ok(bank.clone())))
}

/// GET /api/check-digit?serial=..&bank_code=..
async fn check_digit(Query(query): Query<CheckDigitQuery>) -> ApiResult<CheckDigitResponse> {
    let digit = compute_check_digit(&query.serial, &query.bank_code)?;
    let account_number = format!("{:0>width$}{}", query.serial, digit, width = SERIAL_LENGTH);

    Ok(Json(ApiResponse::ok(CheckDigitResponse {
        serial: query.serial,
        bank_code: query.bank_code,
        check_digit: digit,
        account_number,
    })))
}

/// GET /api/possible-banks/:account?weighted=true
async fn possible_banks(
    Path(account_number): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Bank>> {
    validate_account_number(&account_number)?;
    let banks = get_possible_issuers(&account_number, candidates(query.weighted));
    Ok(Json(ApiResponse::ok(banks)))
}

/// GET /api/validate?account_number=..&bank_code=..&provider=..
async fn validate_account(
    State(state): State<AppState>,
    Query(query): Query<ValidateQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let provider = parse_provider(query.provider)?;
    let details = state
        .validator
        .validate(&query.account_number, &query.bank_code, provider)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "account validation failed"))?;
    Ok(Json(ApiResponse::ok(details)))
}

/// GET /api/card-bin/:bin?provider=..
async fn card_bin(
    State(state): State<AppState>,
    Path(bin): Path<String>,
    Query(query): Query<ProviderQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let provider = parse_provider(query.provider)?;
    let card = state
        .validator
        .resolve_card(&bin, provider)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "card BIN lookup failed"))?;
    Ok(Json(ApiResponse::ok(card)))
}

// ============================================================================
// Router
// ============================================================================

/// Build the full application router
pub fn router(validator: Validator) -> Router {
    let state = AppState { validator };

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/banks", get(list_banks))
        .route("/banks/:slug", get(bank_by_slug))
        .route("/banks/code/:code", get(bank_by_code))
        .route("/check-digit", get(check_digit))
        .route("/possible-banks/:account", get(possible_banks))
        .route("/validate", get(validate_account))
        .route("/card-bin/:bin", get(card_bin))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// TESTS
// ============================================================================
