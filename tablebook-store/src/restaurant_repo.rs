use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tablebook_core::{CoreResult, Restaurant, RestaurantRepository};

use crate::database::map_db_error;

pub struct PgRestaurantRepository {
    pool: PgPool,
}

impl PgRestaurantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RestaurantRow {
    id: i32,
    name: String,
}

impl From<RestaurantRow> for Restaurant {
    fn from(row: RestaurantRow) -> Self {
        Self { id: row.id, name: row.name }
    }
}

#[async_trait]
impl RestaurantRepository for PgRestaurantRepository {
    async fn list_restaurants(&self) -> CoreResult<Vec<Restaurant>> {
        let rows =
            sqlx::query_as::<_, RestaurantRow>("SELECT id, name FROM restaurants ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Restaurant::from).collect())
    }

    async fn get_restaurant(&self, id: i32) -> CoreResult<Option<Restaurant>> {
        let row =
            sqlx::query_as::<_, RestaurantRow>("SELECT id, name FROM restaurants WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(row.map(Restaurant::from))
    }

    async fn create_restaurants(&self, names: &[String]) -> CoreResult<u64> {
        if names.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("INSERT INTO restaurants (name) ");
        builder.push_values(names, |mut b, name| {
            b.push_bind(name);
        });

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
