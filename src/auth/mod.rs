mod helpers;
mod middleware;
mod session;
mod token;

pub use middleware::{CurrentSession, RequireAdmin, RequireAuth, RequireProfile, RequireRole};
pub use session::Session;
pub use token::{IssuedToken, TokenIssuer, TokenParts, parse_token};
