use axum::{extract::State, routing::{get, post}, Json, Router};
use tower_http::trace::TraceLayer;

use formilo_core::telemetry::TelemetrySnapshot;

use crate::contact;
use crate::prelude::*;

pub fn init(app: App) -> Router {
	Router::new()
		.route("/api/contact", post(contact::handler::post_contact))
		.route("/api/stats", get(get_stats))
		.route("/api/health", get(async || "ok\n"))
		.layer(TraceLayer::new_for_http())
		.with_state(app)
}

async fn get_stats(State(app): State<App>) -> Json<TelemetrySnapshot> {
	Json(app.telemetry.snapshot())
}

// vim: ts=4
