//! # snapbook-auth
//!
//! Credential and token service for Snapbook:
//!
//! - `jwt` — access/refresh token creation and validation
//! - `password` — Argon2id password hashing and verification
//! - `google` — Google ID-token verification (issuer + audience)
//! - `service` — login, registration, and refresh flows

pub mod google;
pub mod jwt;
pub mod password;
pub mod service;

pub use google::{GoogleClaims, GoogleTokenVerifier};
pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};
pub use password::PasswordHasher;
pub use service::AuthService;
