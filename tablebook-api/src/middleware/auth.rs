use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use tablebook_core::Customer;

use crate::{error::AppError, state::AppState};

/// Identity resolved from a valid bearer token, stored in request extensions.
#[derive(Debug, Clone)]
pub struct CurrentCustomer(pub Customer);

// ============================================================================
// Identity Middleware
// ============================================================================

/// Runs on every request. A request without an `Authorization` header goes
/// through anonymously; one with a malformed, expired or forged token, or a
/// token for a customer that no longer exists, is rejected here and never
/// reaches a route.
pub async fn identify_customer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 1. Extract token, if any
    let header = req
        .headers()
        .typed_try_get::<Authorization<Bearer>>()
        .map_err(|_| {
            tracing::warn!("Malformed Authorization header");
            AppError::InvalidToken("Authorization header must be `Bearer <token>`".to_string())
        })?;

    let Some(Authorization(bearer)) = header else {
        return Ok(next.run(req).await);
    };

    // 2. Verify signature and expiry
    let customer_id = state.tokens.verify(bearer.token()).map_err(|e| {
        tracing::warn!("Rejected token: {}", e);
        AppError::from(e)
    })?;

    // 3. Resolve the customer it names
    let customer = state
        .customers
        .get_customer(customer_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token names unknown customer {}", customer_id);
            AppError::NotFound("Customer no longer exists".to_string())
        })?;

    // 4. Attach identity
    req.extensions_mut().insert(CurrentCustomer(customer));

    Ok(next.run(req).await)
}

// ============================================================================
// Authentication Gate
// ============================================================================

/// Per-route gate; install with `route_layer(from_fn(authenticate))`.
pub async fn authenticate(req: Request, next: Next) -> Result<Response, AppError> {
    if req.extensions().get::<CurrentCustomer>().is_none() {
        return Err(AppError::Unauthorized("You must be logged in.".to_string()));
    }
    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for CurrentCustomer
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentCustomer>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("You must be logged in.".to_string()))
    }
}

/// Identity for routes that change shape for logged-in customers.
#[derive(Debug, Clone)]
pub struct MaybeCustomer(pub Option<Customer>);

impl<S> FromRequestParts<S> for MaybeCustomer
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeCustomer(
            parts.extensions.get::<CurrentCustomer>().map(|c| c.0.clone()),
        ))
    }
}
