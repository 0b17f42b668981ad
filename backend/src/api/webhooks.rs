use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Form, Json};
use serde_json::Value;
use tosla::{ThreeDsCallback, Tosla};

/**
Bank redirect target after the 3-D Secure step. Nothing in the form is
trusted or logged until its hash checks out. A body that does not decode
counts as a failed check.
 */
pub async fn three_ds_confirm(
    State(tosla): State<Arc<Tosla>>,
    callback: Result<Form<ThreeDsCallback>, FormRejection>,
) -> StatusCode {
    let Ok(Form(callback)) = callback else {
        tracing::warn!("Rejected undecodable 3DS callback");
        return StatusCode::UNAUTHORIZED;
    };

    let verified = match callback.authenticate(tosla.credentials()) {
        Ok(verified) => verified,
        Err(err) => {
            tracing::warn!(error = %err, "Rejected 3DS callback");
            return StatusCode::UNAUTHORIZED;
        }
    };

    tracing::info!(
        order_id = %verified.order_id,
        md_status = %verified.md_status,
        bank_response_code = %verified.bank_response_code,
        bank_response_message = %verified.bank_response_message,
        request_status = %verified.request_status,
        "3DS callback verified"
    );

    StatusCode::OK
}

/// Unsigned notifications, logged for manual inspection only.
pub async fn webhook(Json(body): Json<Value>) -> StatusCode {
    match body.as_object() {
        Some(fields) => {
            for (key, value) in fields {
                tracing::info!(%key, %value, "Unverified webhook field");
            }
        }
        None => tracing::info!(%body, "Unverified webhook payload"),
    }

    StatusCode::OK
}
