//! Top-level error wrapper types.

use crate::{ConfigError, HostError};

/// The foundation error enum for the Fresco workspace.
///
/// # Examples
///
/// ```
/// use fresco_error::{FrescoError, HostError};
///
/// let host_err = HostError::new("Missing Permissions");
/// let err: FrescoError = host_err.into();
/// assert!(format!("{}", err).contains("Host Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum FrescoErrorKind {
    /// Remote platform call failed
    #[from(HostError)]
    Host(HostError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Fresco error with kind discrimination.
///
/// # Examples
///
/// ```
/// use fresco_error::{FrescoResult, ConfigError};
///
/// fn might_fail() -> FrescoResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Fresco Error: {}", _0)]
pub struct FrescoError(Box<FrescoErrorKind>);

impl FrescoError {
    /// Create a new error from a kind.
    pub fn new(kind: FrescoErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FrescoErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to FrescoErrorKind
impl<T> From<T> for FrescoError
where
    T: Into<FrescoErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Fresco operations.
///
/// # Examples
///
/// ```
/// use fresco_error::{FrescoResult, HostError};
///
/// fn fetch_guild() -> FrescoResult<String> {
///     Err(HostError::new("Unknown Guild"))?
/// }
/// ```
pub type FrescoResult<T> = std::result::Result<T, FrescoError>;
