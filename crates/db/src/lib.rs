pub mod connection;
pub mod migrations;
pub mod repositories;

pub use connection::{connect, connect_with_settings, connection_url, DbPool};
pub use repositories::{
    CustomerRepository, InMemoryCustomerRepository, RepositoryError, SqlCustomerRepository,
};
