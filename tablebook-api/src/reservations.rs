use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use serde::{de, Deserialize, Deserializer};
use tablebook_core::{NewReservation, Reservation, ReservationWithRestaurant};
use tracing::info;

use crate::{
    error::AppError,
    middleware::{authenticate, CurrentCustomer},
    state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    #[serde(deserialize_with = "coerce_i32")]
    pub party_size: i32,
    #[serde(deserialize_with = "coerce_i32")]
    pub restaurant_id: i32,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reservations", get(list_reservations).post(create_reservation))
        .route_layer(middleware::from_fn(authenticate))
}

async fn list_reservations(
    State(state): State<AppState>,
    CurrentCustomer(customer): CurrentCustomer,
) -> Result<Json<Vec<ReservationWithRestaurant>>, AppError> {
    Ok(Json(state.reservations.list_for_customer(customer.id).await?))
}

async fn create_reservation(
    State(state): State<AppState>,
    CurrentCustomer(customer): CurrentCustomer,
    Json(req): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<Reservation>), AppError> {
    let reservation = state
        .reservations
        .create_reservation(&NewReservation {
            party_size: req.party_size,
            restaurant_id: req.restaurant_id,
            customer_id: customer.id,
        })
        .await?;

    info!(
        "Reservation {} created for customer {} at restaurant {}",
        reservation.id, customer.id, reservation.restaurant_id
    );

    Ok((StatusCode::CREATED, Json(reservation)))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

/// Accepts `2` as well as `"2"`.
fn coerce_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(n) => n,
        IntOrString::Str(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::custom(format!("expected an integer, got {:?}", s)))?,
    };
    i32::try_from(value).map_err(|_| de::Error::custom(format!("integer {} out of range", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_coerces_numeric_strings() {
        let req: CreateReservationRequest =
            serde_json::from_str(r#"{"partySize": "4", "restaurantId": 2}"#).unwrap();
        assert_eq!(req.party_size, 4);
        assert_eq!(req.restaurant_id, 2);
    }

    #[test]
    fn test_request_rejects_non_numeric() {
        let result: Result<CreateReservationRequest, _> =
            serde_json::from_str(r#"{"partySize": "many", "restaurantId": 2}"#);
        assert!(result.is_err());

        let result: Result<CreateReservationRequest, _> =
            serde_json::from_str(r#"{"partySize": 2, "restaurantId": 9999999999}"#);
        assert!(result.is_err());
    }
}
