pub mod config;
pub mod domain;
pub mod properties;
pub mod validation;

pub use config::{AppConfig, ConfigError, DatabaseConfig, LogFormat, LoggingConfig};
pub use domain::customer::{Customer, CustomerDraft, CustomerId};
pub use properties::{Properties, PropertiesError, PropertiesLoader};
pub use validation::{CustomerValidator, ValidationError, Validator};
