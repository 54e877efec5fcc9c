//! Estimate Route

use axum::{extract::State, http::StatusCode, Json};
use feature_builder::RawInput;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::AppState;

/// Request body for the estimate endpoint
#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    /// Optional display name echoed back in the response
    pub channel_name: Option<String>,
    #[serde(flatten)]
    pub input: RawInput,
}

/// Response for the estimate endpoint
#[derive(Debug, Serialize)]
pub struct EstimateResponse {
    /// Estimated monthly earnings in USD
    pub estimated_monthly_earnings: f64,
    /// Display string with currency symbol and thousands separators
    pub formatted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    pub latency_ms: u64,
}

/// Error body for estimate failures
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

type EstimateRejection = (StatusCode, Json<ErrorResponse>);

/// Estimate monthly earnings for one channel
pub async fn post_estimate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EstimateRequest>,
) -> Result<Json<EstimateResponse>, EstimateRejection> {
    let start = std::time::Instant::now();

    let validation = state.validator.validate(&request.input);
    if !validation.valid {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: "input out of bounds".to_string(),
                details: validation.errors.iter().map(|e| e.to_string()).collect(),
            }),
        ));
    }

    let features = state.builder.build(&request.input).map_err(|e| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse {
                error: e.to_string(),
                details: Vec::new(),
            }),
        )
    })?;

    let earnings = state.predictor.predict(&features).map_err(|e| {
        warn!("prediction failed: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "prediction failed".to_string(),
                details: Vec::new(),
            }),
        )
    })?;

    Ok(Json(EstimateResponse {
        estimated_monthly_earnings: earnings,
        formatted: format_usd(earnings),
        channel_name: request.channel_name,
        latency_ms: start.elapsed().as_millis() as u64,
    }))
}

/// Currency display string: two decimals, thousands separators.
/// `amount` is already clamped non-negative by the predictor.
fn format_usd(amount: f64) -> String {
    let cents = (amount * 100.0).round() as u128;
    let dollars = group_thousands(cents / 100);
    format!("US$ {dollars}.{:02}", cents % 100)
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
