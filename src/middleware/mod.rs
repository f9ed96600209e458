pub mod auth;
pub mod security_headers;

pub use auth::SessionAuth;
pub use security_headers::SecurityHeaders;
