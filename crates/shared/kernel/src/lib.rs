//! Kernel utilities shared across slices.
//! Keep this crate lightweight: access keys, config loading, and the domain re-export.
//!
//! ## Access keys
//! ```rust
//! use ts64_kernel::access::AccessKey;
//!
//! let key = AccessKey::generate();
//! assert!(key.as_str().starts_with("TS64-"));
//!
//! let parsed = AccessKey::parse(" ts64-7qx2-k9lm ").unwrap();
//! assert_eq!(parsed.as_str(), "TS64-7QX2-K9LM");
//! assert_eq!(parsed.stash_id().as_str(), "7QX2");
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use ts64_kernel::config::load_config;
//! use ts64_kernel::domain::config::AppConfig;
//!
//! let cfg: AppConfig = load_config::<AppConfig>(None::<&str>)?;
//! ```

pub mod access;
pub mod config;
pub mod prelude;

pub use ts64_domain as domain;
