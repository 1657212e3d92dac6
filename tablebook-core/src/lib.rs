pub mod models;
pub mod repository;

pub use models::{
    Customer, CustomerRecord, NewReservation, Reservation, ReservationWithRestaurant, Restaurant,
    RestaurantDetail,
};
pub use repository::{CustomerRepository, ReservationRepository, RestaurantRepository};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
