//! In-process repositories backed by `Vec`s behind a `tokio::sync::RwLock`.
//!
//! Enforces the same constraints as the Postgres schema (unique email,
//! existing restaurant and customer, positive party size) so handlers behave
//! identically against either backend.

use async_trait::async_trait;
use tablebook_core::{
    CoreError, CoreResult, Customer, CustomerRecord, CustomerRepository, NewReservation,
    Reservation, ReservationRepository, ReservationWithRestaurant, Restaurant,
    RestaurantRepository,
};
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    customers: Vec<CustomerRecord>,
    restaurants: Vec<Restaurant>,
    reservations: Vec<Reservation>,
    next_customer_id: i32,
    next_restaurant_id: i32,
    next_reservation_id: i32,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deletes a customer and cascades to their reservations.
    pub async fn remove_customer(&self, id: i32) -> bool {
        let mut tables = self.tables.write().await;
        let before = tables.customers.len();
        tables.customers.retain(|c| c.id != id);
        tables.reservations.retain(|r| r.customer_id != id);
        tables.customers.len() != before
    }
}

#[async_trait]
impl CustomerRepository for MemoryStore {
    async fn create_customer(&self, email: &str, password_hash: &str) -> CoreResult<Customer> {
        let mut tables = self.tables.write().await;
        if tables.customers.iter().any(|c| c.email == email) {
            return Err(CoreError::Conflict("Email is already registered".to_string()));
        }

        tables.next_customer_id += 1;
        let record = CustomerRecord {
            id: tables.next_customer_id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
        };
        tables.customers.push(record.clone());

        Ok(record.into())
    }

    async fn find_by_email(&self, email: &str) -> CoreResult<Option<CustomerRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.customers.iter().find(|c| c.email == email).cloned())
    }

    async fn get_customer(&self, id: i32) -> CoreResult<Option<Customer>> {
        let tables = self.tables.read().await;
        Ok(tables
            .customers
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .map(Customer::from))
    }
}

#[async_trait]
impl RestaurantRepository for MemoryStore {
    async fn list_restaurants(&self) -> CoreResult<Vec<Restaurant>> {
        Ok(self.tables.read().await.restaurants.clone())
    }

    async fn get_restaurant(&self, id: i32) -> CoreResult<Option<Restaurant>> {
        let tables = self.tables.read().await;
        Ok(tables.restaurants.iter().find(|r| r.id == id).cloned())
    }

    async fn create_restaurants(&self, names: &[String]) -> CoreResult<u64> {
        let mut tables = self.tables.write().await;
        for name in names {
            tables.next_restaurant_id += 1;
            let id = tables.next_restaurant_id;
            tables.restaurants.push(Restaurant { id, name: name.clone() });
        }
        Ok(names.len() as u64)
    }
}

#[async_trait]
impl ReservationRepository for MemoryStore {
    async fn create_reservation(&self, reservation: &NewReservation) -> CoreResult<Reservation> {
        reservation.validate()?;

        let mut tables = self.tables.write().await;
        if !tables.restaurants.iter().any(|r| r.id == reservation.restaurant_id) {
            return Err(CoreError::ValidationError(format!(
                "Restaurant {} does not exist",
                reservation.restaurant_id
            )));
        }
        if !tables.customers.iter().any(|c| c.id == reservation.customer_id) {
            return Err(CoreError::ValidationError(format!(
                "Customer {} does not exist",
                reservation.customer_id
            )));
        }

        tables.next_reservation_id += 1;
        let created = Reservation {
            id: tables.next_reservation_id,
            party_size: reservation.party_size,
            restaurant_id: reservation.restaurant_id,
            customer_id: reservation.customer_id,
        };
        tables.reservations.push(created.clone());

        Ok(created)
    }

    async fn list_for_customer(
        &self,
        customer_id: i32,
    ) -> CoreResult<Vec<ReservationWithRestaurant>> {
        let tables = self.tables.read().await;
        tables
            .reservations
            .iter()
            .filter(|r| r.customer_id == customer_id)
            .map(|r| -> CoreResult<ReservationWithRestaurant> {
                let restaurant = tables
                    .restaurants
                    .iter()
                    .find(|rs| rs.id == r.restaurant_id)
                    .cloned()
                    .ok_or_else(|| {
                        CoreError::Storage(format!(
                            "Dangling restaurant reference {}",
                            r.restaurant_id
                        ))
                    })?;
                Ok(ReservationWithRestaurant {
                    reservation: r.clone(),
                    restaurant,
                })
            })
            .collect()
    }

    async fn list_for_customer_at(
        &self,
        customer_id: i32,
        restaurant_id: i32,
    ) -> CoreResult<Vec<Reservation>> {
        let tables = self.tables.read().await;
        Ok(tables
            .reservations
            .iter()
            .filter(|r| r.customer_id == customer_id && r.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }
}
