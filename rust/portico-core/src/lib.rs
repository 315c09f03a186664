#[macro_use]
extern crate tracing;

mod document;
mod endpoints;
mod error;
mod parameters;
mod redirect;
mod schema;
mod session;
mod storage;
mod token;

pub use document::*;
pub use endpoints::*;
pub use error::*;
pub use parameters::*;
pub use redirect::*;
pub use schema::*;
pub use session::*;
pub use storage::*;
pub use token::*;
