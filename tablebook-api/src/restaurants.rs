use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tablebook_core::{Restaurant, RestaurantDetail};

use crate::{error::AppError, middleware::MaybeCustomer, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route("/restaurants/{id}", get(get_restaurant))
}

async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<Restaurant>>, AppError> {
    Ok(Json(state.restaurants.list_restaurants().await?))
}

/// Open to everyone; a logged-in customer also sees their own bookings here.
async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    MaybeCustomer(customer): MaybeCustomer,
) -> Result<Json<RestaurantDetail>, AppError> {
    let restaurant = state
        .restaurants
        .get_restaurant(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Restaurant {} not found", id)))?;

    let reservations = match customer {
        Some(customer) => Some(
            state
                .reservations
                .list_for_customer_at(customer.id, restaurant.id)
                .await?,
        ),
        None => None,
    };

    Ok(Json(RestaurantDetail { restaurant, reservations }))
}
