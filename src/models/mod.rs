pub mod company;
pub mod favorite;
pub mod auth;
pub mod query;

pub use company::*;
pub use favorite::*;
pub use auth::*;
pub use query::*;
