use std::sync::Arc;
use tablebook_core::{CustomerRepository, ReservationRepository, RestaurantRepository};
use tablebook_store::CredentialStore;

use crate::token::TokenCodec;

#[derive(Clone)]
pub struct AppState {
    pub credentials: CredentialStore,
    pub customers: Arc<dyn CustomerRepository>,
    pub restaurants: Arc<dyn RestaurantRepository>,
    pub reservations: Arc<dyn ReservationRepository>,
    pub tokens: Arc<TokenCodec>,
}
