pub mod account;
pub mod admin;
pub mod api;
pub mod checkout;
pub mod cli;
pub mod config;
pub mod debounce;
pub mod error;
pub mod format;
pub mod listing;
pub mod models;
pub mod routes;
pub mod session;
pub mod store;
pub mod view;

pub use api::ApiClient;
pub use config::Config;
pub use error::{ApiError, ClientError, ClientResult};
pub use session::{Session, SessionContext};
