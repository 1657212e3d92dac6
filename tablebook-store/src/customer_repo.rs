use async_trait::async_trait;
use sqlx::PgPool;
use tablebook_core::{Customer, CustomerRecord, CustomerRepository, CoreResult};

use crate::database::map_db_error;

pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: i32,
    email: String,
    password: String,
}

impl From<CustomerRow> for CustomerRecord {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            password_hash: row.password,
        }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn create_customer(&self, email: &str, password_hash: &str) -> CoreResult<Customer> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            INSERT INTO customers (email, password)
            VALUES ($1, $2)
            RETURNING id, email, password
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(CustomerRecord::from(row).into())
    }

    async fn find_by_email(&self, email: &str) -> CoreResult<Option<CustomerRecord>> {
        let row = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, email, password FROM customers WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(CustomerRecord::from))
    }

    async fn get_customer(&self, id: i32) -> CoreResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, email, password FROM customers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(row.map(|r| CustomerRecord::from(r).into()))
    }
}
