//! Authentication adapters: JWT tokens and Argon2id credential hashing.

mod jwt;
mod password;

pub use jwt::{JwtSettings, JwtTokenService};
pub use password::Argon2CredentialHasher;
