//! Authentication adapters.
//!
//! - `password` - Argon2id implementation of `PasswordHasher`
//! - `jwt` - HS256 implementation of `TokenIssuer` and `SessionValidator`
//! - `access_gate` - Role-based `AccessGate` reading the user store

mod access_gate;
mod jwt;
mod password;

pub use access_gate::RoleAccessGate;
pub use jwt::{Claims, JwtTokenService};
pub use password::Argon2PasswordHasher;
