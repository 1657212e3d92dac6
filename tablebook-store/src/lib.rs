pub mod app_config;
pub mod credentials;
pub mod customer_repo;
pub mod database;
pub mod memory;
pub mod reservation_repo;
pub mod restaurant_repo;
pub mod seed;

pub use credentials::CredentialStore;
pub use customer_repo::PgCustomerRepository;
pub use database::DbClient;
pub use memory::MemoryStore;
pub use reservation_repo::PgReservationRepository;
pub use restaurant_repo::PgRestaurantRepository;
