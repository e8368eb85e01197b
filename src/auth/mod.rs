//! Login boundary: password hashing and the authenticated-user extractor.

pub mod extractor;
pub mod password;

pub use extractor::AuthUser;
pub use password::{hash_password, verify_password};
