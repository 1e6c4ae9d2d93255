//! Authentication infrastructure - JWT session tokens

mod jwt;

pub use jwt::{JwtClaims, JwtConfig, JwtGenerator, JwtService};
