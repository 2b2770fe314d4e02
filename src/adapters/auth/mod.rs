//! Authentication adapters implementing the `SessionValidator` port.
//!
//! - `JwtSessionValidator` - HS256 bearer tokens with a shared secret
//! - `MockSessionValidator` - fixed token table for tests and local runs

mod jwt;
mod mock;

pub use jwt::JwtSessionValidator;
pub use mock::MockSessionValidator;
