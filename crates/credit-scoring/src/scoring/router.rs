use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tracing::{info, warn};

use super::domain::{ScoreRequest, ScoreResult};
use super::intake::validate;
use super::ScoringEngine;
use crate::error::AppError;

/// Router exposing `POST /score` backed by a shared engine.
pub fn scoring_router(engine: Arc<ScoringEngine>) -> Router {
    Router::new()
        .route("/score", post(score_handler))
        .with_state(engine)
}

pub(crate) async fn score_handler(
    State(engine): State<Arc<ScoringEngine>>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResult>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(%rejection, "rejected malformed score request");
        AppError::MalformedBody(rejection.body_text())
    })?;

    let profile =
        validate(request).inspect_err(|err| warn!(%err, "score request failed validation"))?;
    info!(
        age = profile.age(),
        income = profile.income(),
        "scoring request for applicant"
    );

    let result = engine.score(&profile);
    info!(
        score = result.score,
        decision = %result.decision,
        risk_level = %result.risk_level,
        "score calculated"
    );

    Ok(Json(result))
}
