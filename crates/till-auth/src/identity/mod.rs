//! Identity providers.

pub mod token;

pub use token::JwtIdentityProvider;
