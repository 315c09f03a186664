mod auth;
pub use auth::*;

mod document;
pub use document::*;

mod ui;
pub use ui::*;

mod user;
pub use user::*;
