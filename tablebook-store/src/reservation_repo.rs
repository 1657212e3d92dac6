use async_trait::async_trait;
use sqlx::PgPool;
use tablebook_core::{
    CoreResult, NewReservation, Reservation, ReservationRepository, ReservationWithRestaurant,
    Restaurant,
};

use crate::database::map_db_error;

pub struct PgReservationRepository {
    pool: PgPool,
}

impl PgReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ReservationRow {
    id: i32,
    party_size: i32,
    restaurant_id: i32,
    customer_id: i32,
}

impl From<ReservationRow> for Reservation {
    fn from(row: ReservationRow) -> Self {
        Self {
            id: row.id,
            party_size: row.party_size,
            restaurant_id: row.restaurant_id,
            customer_id: row.customer_id,
        }
    }
}

#[derive(sqlx::FromRow)]
struct JoinedRow {
    id: i32,
    party_size: i32,
    restaurant_id: i32,
    customer_id: i32,
    restaurant_name: String,
}

#[async_trait]
impl ReservationRepository for PgReservationRepository {
    async fn create_reservation(&self, reservation: &NewReservation) -> CoreResult<Reservation> {
        reservation.validate()?;

        let row = sqlx::query_as::<_, ReservationRow>(
            r#"
            INSERT INTO reservations (party_size, restaurant_id, customer_id)
            VALUES ($1, $2, $3)
            RETURNING id, party_size, restaurant_id, customer_id
            "#,
        )
        .bind(reservation.party_size)
        .bind(reservation.restaurant_id)
        .bind(reservation.customer_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.into())
    }

    async fn list_for_customer(
        &self,
        customer_id: i32,
    ) -> CoreResult<Vec<ReservationWithRestaurant>> {
        let rows = sqlx::query_as::<_, JoinedRow>(
            r#"
            SELECT r.id, r.party_size, r.restaurant_id, r.customer_id, rs.name AS restaurant_name
            FROM reservations r
            JOIN restaurants rs ON rs.id = r.restaurant_id
            WHERE r.customer_id = $1
            ORDER BY r.id
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|row| ReservationWithRestaurant {
                reservation: Reservation {
                    id: row.id,
                    party_size: row.party_size,
                    restaurant_id: row.restaurant_id,
                    customer_id: row.customer_id,
                },
                restaurant: Restaurant {
                    id: row.restaurant_id,
                    name: row.restaurant_name,
                },
            })
            .collect())
    }

    async fn list_for_customer_at(
        &self,
        customer_id: i32,
        restaurant_id: i32,
    ) -> CoreResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, ReservationRow>(
            r#"
            SELECT id, party_size, restaurant_id, customer_id
            FROM reservations
            WHERE customer_id = $1 AND restaurant_id = $2
            ORDER BY id
            "#,
        )
        .bind(customer_id)
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Reservation::from).collect())
    }
}
