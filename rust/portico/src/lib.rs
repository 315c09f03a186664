#[macro_use]
extern crate tracing;

mod auth;
mod config;
mod error;
mod github;
pub mod openapi;
pub mod routes;
mod serve;
mod storage;

pub use auth::*;
pub use config::*;
pub use error::*;
pub use github::*;
pub use serve::*;
pub use storage::*;
