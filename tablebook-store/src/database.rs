use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;
use tablebook_core::CoreError;
use tracing::info;

#[derive(Clone)]
pub struct DbClient {
    pub pool: Pool<Postgres>,
}

impl DbClient {
    pub async fn new(connection_string: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(connection_string)
            .await?;

        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("../migrations")
            .run(&self.pool)
            .await?;
        info!("Migrations completed successfully.");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed.");
    }
}

/// Maps driver errors onto the domain taxonomy. Constraint violations are
/// the only source of `Conflict` and foreign-key `ValidationError`s.
pub(crate) fn map_db_error(err: sqlx::Error) -> CoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            CoreError::Conflict("Email is already registered".to_string())
        }
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            CoreError::ValidationError(format!(
                "Referenced record does not exist ({})",
                db_err.constraint().unwrap_or("foreign key")
            ))
        }
        sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
            CoreError::ValidationError(db_err.message().to_string())
        }
        _ => CoreError::Storage(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct FakeDbError {
        kind: ErrorKind,
        constraint: Option<&'static str>,
    }

    impl fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{:?}", self.kind)
        }
    }

    impl StdError for FakeDbError {}

    impl DatabaseError for FakeDbError {
        fn message(&self) -> &str {
            "new row violates check constraint \"reservations_party_size_check\""
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }

        fn kind(&self) -> ErrorKind {
            match self.kind {
                ErrorKind::UniqueViolation => ErrorKind::UniqueViolation,
                ErrorKind::ForeignKeyViolation => ErrorKind::ForeignKeyViolation,
                ErrorKind::CheckViolation => ErrorKind::CheckViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn db_error(kind: ErrorKind, constraint: Option<&'static str>) -> sqlx::Error {
        sqlx::Error::Database(Box::new(FakeDbError { kind, constraint }))
    }

    #[test]
    fn test_unique_violation_is_conflict() {
        let err = map_db_error(db_error(ErrorKind::UniqueViolation, Some("customers_email_key")));
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[test]
    fn test_foreign_key_violation_is_validation_error() {
        let err = map_db_error(db_error(
            ErrorKind::ForeignKeyViolation,
            Some("reservations_restaurant_id_fkey"),
        ));
        match err {
            CoreError::ValidationError(msg) => {
                assert!(msg.contains("reservations_restaurant_id_fkey"))
            }
            other => panic!("expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_check_violation_is_validation_error() {
        let err = map_db_error(db_error(ErrorKind::CheckViolation, None));
        match err {
            CoreError::ValidationError(msg) => assert!(msg.contains("party_size")),
            other => panic!("expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_other_errors_are_storage() {
        assert!(matches!(
            map_db_error(db_error(ErrorKind::Other, None)),
            CoreError::Storage(_)
        ));
        assert!(matches!(map_db_error(sqlx::Error::PoolTimedOut), CoreError::Storage(_)));
        assert!(matches!(map_db_error(sqlx::Error::RowNotFound), CoreError::Storage(_)));
    }
}
