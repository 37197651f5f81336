//! Error types for the Fresco workspace.
//!
//! This crate provides the foundation error types used throughout Fresco.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*Error` structs wrap a message with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//! - `FrescoError` is the top-level enum that every other error converts into
//!
//! # Examples
//!
//! ```
//! use fresco_error::{FrescoResult, HostError};
//!
//! fn delete_channel() -> FrescoResult<()> {
//!     Err(HostError::new("Missing Access"))?
//! }
//!
//! match delete_channel() {
//!     Ok(_) => println!("Deleted"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod host;

pub use config::ConfigError;
pub use error::{FrescoError, FrescoErrorKind, FrescoResult};
pub use host::HostError;
