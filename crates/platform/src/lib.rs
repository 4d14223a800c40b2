//! Platform - Domain-free infrastructure utilities
//!
//! Building blocks shared by the backend crates:
//! - `password` - NIST SP 800-63B compliant password policy and Argon2id hashing
//! - `bearer` - `Authorization: Bearer` header extraction

pub mod bearer;
pub mod password;
