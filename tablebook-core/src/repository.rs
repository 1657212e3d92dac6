use async_trait::async_trait;

use crate::models::{
    Customer, CustomerRecord, NewReservation, Reservation, ReservationWithRestaurant, Restaurant,
};
use crate::CoreResult;

/// Repository trait for customer accounts
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Fails with `Conflict` when the email is already registered.
    async fn create_customer(&self, email: &str, password_hash: &str) -> CoreResult<Customer>;

    async fn find_by_email(&self, email: &str) -> CoreResult<Option<CustomerRecord>>;

    async fn get_customer(&self, id: i32) -> CoreResult<Option<Customer>>;
}

/// Repository trait for the restaurant catalog
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    async fn list_restaurants(&self) -> CoreResult<Vec<Restaurant>>;

    async fn get_restaurant(&self, id: i32) -> CoreResult<Option<Restaurant>>;

    async fn create_restaurants(&self, names: &[String]) -> CoreResult<u64>;
}

/// Repository trait for reservations
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Fails with `ValidationError` when the restaurant or customer does not exist.
    async fn create_reservation(&self, reservation: &NewReservation) -> CoreResult<Reservation>;

    async fn list_for_customer(&self, customer_id: i32)
        -> CoreResult<Vec<ReservationWithRestaurant>>;

    async fn list_for_customer_at(
        &self,
        customer_id: i32,
        restaurant_id: i32,
    ) -> CoreResult<Vec<Reservation>>;
}
