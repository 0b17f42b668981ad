pub mod webhooks;

use std::sync::Arc;

use axum::routing::post;
use axum::Router;
use tosla::Tosla;
use tower_http::trace::TraceLayer;

use crate::api::webhooks::{three_ds_confirm, webhook};

pub fn router(tosla: Arc<Tosla>) -> Router {
    Router::new()
        .route("/3dsconfirm", post(three_ds_confirm))
        .route("/webhook", post(webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(tosla)
}
