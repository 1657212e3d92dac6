pub mod auth;

pub use auth::{authenticate, identify_customer, CurrentCustomer, MaybeCustomer};
