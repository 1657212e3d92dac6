use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

async fn register(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let customer = state.credentials.register(&req.email, &req.password).await?;
    let token = state.tokens.issue(customer.id)?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token })))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let customer = state.credentials.login(&req.email, &req.password).await?;
    let token = state.tokens.issue(customer.id)?;

    Ok(Json(AuthResponse { token }))
}
