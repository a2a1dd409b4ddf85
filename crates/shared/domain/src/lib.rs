//! # Domain Models
//!
//! Pure TetraScript64 types with a single dependency (`serde`).
//! Keep it lean: no I/O, crypto, or heavy logic. Just data and simple helpers.

pub mod config;
pub mod media;
pub mod stash;
