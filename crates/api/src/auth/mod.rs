pub mod config;
pub mod jwt;
pub mod oauth;
pub mod permissions;
pub mod session;

pub use config::AuthConfig;
pub use jwt::{Claims, JwtService};
pub use oauth::{OAuthProvider, OAuthService};
pub use permissions::{check_ownership_or_admin, level_satisfies, require_level, Level, OwnerRef};
pub use session::AuthSession;
