pub mod auth;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod guard;
pub mod http;
pub mod listing;
pub mod query;
pub mod resources;

pub use error::ApiError;
