use std::sync::Arc;

use tablebook_core::{CoreError, CoreResult, Customer, CustomerRepository};
use tracing::{info, warn};

/// Registration and login over a [`CustomerRepository`]. Passwords are
/// bcrypt-hashed on the blocking pool so request tasks never stall on them.
#[derive(Clone)]
pub struct CredentialStore {
    customers: Arc<dyn CustomerRepository>,
    cost: u32,
}

impl CredentialStore {
    pub fn new(customers: Arc<dyn CustomerRepository>, cost: u32) -> Self {
        Self { customers, cost }
    }

    pub async fn register(&self, email: &str, password: &str) -> CoreResult<Customer> {
        let email = normalize_email(email)?;
        if password.is_empty() {
            return Err(CoreError::ValidationError("password is required".to_string()));
        }

        let password = password.to_owned();
        let cost = self.cost;
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| CoreError::Internal(format!("Hashing task failed: {}", e)))?
            .map_err(|e| CoreError::Internal(format!("Password hashing failed: {}", e)))?;

        let customer = self.customers.create_customer(email, &hash).await?;
        info!("Registered customer {}", customer.id);
        Ok(customer)
    }

    pub async fn login(&self, email: &str, password: &str) -> CoreResult<Customer> {
        let email = normalize_email(email)?;
        let record = self
            .customers
            .find_by_email(email)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("No customer registered as {}", email)))?;

        let password = password.to_owned();
        let hash = record.password_hash.clone();
        // bcrypt::verify compares in constant time
        let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| CoreError::Internal(format!("Hashing task failed: {}", e)))?
            .map_err(|e| CoreError::Internal(format!("Password verification failed: {}", e)))?;

        if !valid {
            warn!("Invalid password for customer {}", record.id);
            return Err(CoreError::InvalidCredentials);
        }

        Ok(record.into())
    }
}

fn normalize_email(email: &str) -> CoreResult<&str> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(CoreError::ValidationError("a valid email is required".to_string()));
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    fn store() -> CredentialStore {
        CredentialStore::new(Arc::new(MemoryStore::new()), 4)
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let credentials = store();
        let registered = credentials.register("a@x.com", "pw").await.unwrap();

        let logged_in = credentials.login("a@x.com", "pw").await.unwrap();
        assert_eq!(logged_in, registered);
    }

    #[tokio::test]
    async fn test_register_twice_conflicts() {
        let credentials = store();
        credentials.register("a@x.com", "pw").await.unwrap();

        let err = credentials.register("a@x.com", "other").await.unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let credentials = store();
        credentials.register("a@x.com", "pw").await.unwrap();

        let err = credentials.login("a@x.com", "nope").await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_unknown_email_is_not_found() {
        let err = store().login("ghost@x.com", "pw").await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_hash_is_salted() {
        let repo = Arc::new(MemoryStore::new());
        let credentials = CredentialStore::new(repo.clone(), 4);
        credentials.register("a@x.com", "pw").await.unwrap();
        credentials.register("b@x.com", "pw").await.unwrap();

        let a = repo.find_by_email("a@x.com").await.unwrap().unwrap();
        let b = repo.find_by_email("b@x.com").await.unwrap().unwrap();
        assert_ne!(a.password_hash, "pw");
        assert_ne!(a.password_hash, b.password_hash);
    }

    #[tokio::test]
    async fn test_email_is_trimmed_for_storage_and_lookup() {
        let repo = Arc::new(MemoryStore::new());
        let credentials = CredentialStore::new(repo.clone(), 4);
        let registered = credentials.register(" a@x.com ", "pw").await.unwrap();
        assert_eq!(registered.email, "a@x.com");
        assert!(repo.find_by_email("a@x.com").await.unwrap().is_some());

        let logged_in = credentials.login("a@x.com", "pw").await.unwrap();
        assert_eq!(logged_in.id, registered.id);
        assert_eq!(credentials.login("\ta@x.com\n", "pw").await.unwrap().id, registered.id);

        let err = credentials.register("a@x.com ", "other").await.unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected() {
        let credentials = store();
        assert!(matches!(
            credentials.register("not-an-email", "pw").await,
            Err(CoreError::ValidationError(_))
        ));
        assert!(matches!(
            credentials.register("a@x.com", "").await,
            Err(CoreError::ValidationError(_))
        ));
    }
}
