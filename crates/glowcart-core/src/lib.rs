pub mod app_config;
pub mod config;
pub mod orders;
pub mod products;
pub mod users;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use orders::{CartItem, NewCartItem, OrderConfirmation, PaymentMethod};
pub use products::{Category, Product, UnknownCategory};
pub use users::AuthUser;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
