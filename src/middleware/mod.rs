pub mod auth;
pub mod security_headers;

pub use auth::RequireSession;
pub use security_headers::SecurityHeaders;
