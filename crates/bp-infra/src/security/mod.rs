//! Security adapters.

mod password;

pub use password::Argon2PasswordHasher;
