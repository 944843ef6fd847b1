// 🧪 Mock Providers - in-process stand-in for Paystack + Flutterwave (tests only)

use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::config::Config;

pub const SECRET: &str = "sk_test_mock";

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!("Bearer {}", SECRET);
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some(expected.as_str())
}

fn unauthorized() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "status": false, "message": "Invalid key" })),
    )
        .into_response()
}

async fn paystack_resolve(
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> axum::response::Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    match (params.get("account_number"), params.get("bank_code")) {
        (Some(account), Some(code)) if code == "057" => Json(json!({
            "status": true,
            "message": "Account number resolved",
            "data": { "account_number": account, "account_name": "ADA LOVELACE", "bank_id": 21 }
        }))
        .into_response(),
        _ => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "status": false, "message": "Could not resolve account name" })),
        )
            .into_response(),
    }
}

async fn flutterwave_resolve(headers: HeaderMap, Json(body): Json<Value>) -> axum::response::Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "status": "success",
        "message": "Account details fetched",
        "data": { "account_number": body["account_number"], "account_name": "Pastor Bright" }
    }))
    .into_response()
}

async fn paystack_bin(headers: HeaderMap, Path(bin): Path<String>) -> axum::response::Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "status": true,
        "message": "Bin resolved",
        "data": {
            "bin": bin, "brand": "Mastercard", "sub_brand": "", "country_code": "NG",
            "country_name": "Nigeria", "card_type": "DEBIT", "bank": "Guaranty Trust Bank"
        }
    }))
    .into_response()
}

async fn flutterwave_bin(Path(bin): Path<String>) -> impl IntoResponse {
    Json(json!({
        "status": "success",
        "data": { "bin": bin, "card_type": "VISA", "issuer_info": "DEBIT", "issuing_country": "NIGERIA NG" }
    }))
}

async fn broken() -> impl IntoResponse {
    "<html>gateway</html>"
}

/// Serve the mock on an ephemeral port, returning its base URL
pub async fn spawn() -> String {
    let app = Router::new()
        .route("/bank/resolve", get(paystack_resolve))
        .route("/decision/bin/:bin", get(paystack_bin))
        .route("/v3/accounts/resolve", post(flutterwave_resolve))
        .route("/v3/card-bins/:bin", get(flutterwave_bin))
        .route("/broken/decision/bin/:bin", get(broken));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Config pointing both providers at `base_url` with `key`
pub fn config(base_url: &str, key: &str) -> Config {
    let mut config = Config::default();
    for settings in [&mut config.paystack, &mut config.flutterwave] {
        settings.base_url = base_url.to_string();
        settings.secret_key = Some(key.to_string());
    }
    config
}
