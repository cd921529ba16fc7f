pub mod oauth;
pub mod session;

pub use oauth::{GoogleProvider, IdentityProvider};
pub use session::SessionManager;
