pub mod api_error;
pub mod traits;
pub mod api_client;
pub mod session_store;

pub use api_error::*;
pub use traits::*;
pub use api_client::ApiClient;
pub use session_store::{LocalSessionStore, SessionStore};
