//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations used by the feature crates:
//! - Cryptographic utilities (SHA-256, HMAC, Base64, signed tokens)
//! - Password hashing (Argon2id)
//! - Cookie and bearer-token extraction
//! - Client identification (IP, User-Agent)

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
