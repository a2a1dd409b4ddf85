#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by every TetraScript64 crate.
//!
//! * [`ts64_error`] turns a plain enum into a context-aware `thiserror` error.
//! * [`main`] bootstraps the Tokio runtime profiles exposed by `ts64-runtime`.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! ts64-derive.workspace = true
//! ```

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, parse_macro_input};

/// Attribute macro to bootstrap the workspace Tokio runtime.
///
/// Transforms an `async fn main` into a synchronous `fn main` that builds a runtime
/// from one of the `ts64_runtime::RuntimeConfig` presets and blocks on the body.
///
/// # Arguments
///
/// * `high_performance` - Larger stacks, long keep-alive.
/// * `memory_efficient` - Half the workers, smaller stacks. Suits the terminal shell.
/// * `default` - Worker threads detected from available parallelism.
///
/// # Examples
///
/// ```rust,ignore
/// #[ts64_runtime::main(memory_efficient)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Declares a crate error enum wired into the workspace conventions.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<ErrorName>Ext` trait adding `.context(...)` to `Result<T, ErrorName>` and to
///   `Result<T, SourceError>` for every variant that wraps a source error.
/// * `From<SourceError>` for variants with a `source` field (or `#[source]`/`#[from]`).
/// * `From<&'static str>` and `From<String>` when an `Internal` variant is present.
/// * `ErrorName::with_context(...)` to attach context to a freshly built error.
/// * A module-level `format_context` helper for use in `#[error(...)]` strings.
///
/// # Requirements
///
/// 1. Must be applied to an **enum** with **named-field** variants.
/// 2. A `context` field must be typed `Option<Cow<'static, str>>`.
/// 3. Variants wrapping a source error must also carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[ts64_derive::ts64_error]
/// pub enum StorageError {
///     #[error("Hardware I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal storage error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load(path: &std::path::Path) -> Result<Vec<u8>, StorageError> {
///     std::fs::read(path).context("Loading stash record")
/// }
/// ```
#[proc_macro_attribute]
pub fn ts64_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
