//! Error handling module for format-dispatch.
//!
//! Absent input and unknown format selectors are not errors and never reach
//! this module. What does reach it:
//! - Encoder failures, always propagated
//! - XML coercion failures, the one decode failure that is not absorbed by
//!   the fallback policy
//! - Configuration and I/O errors from the command-line front end
//!
//! # Example
//!
//! ```rust
//! use format_dispatch::error::{DecodeError, DispatchError, Result};
//!
//! fn check(result: Result<i32>) -> bool {
//!     matches!(result, Err(DispatchError::Decode(DecodeError::XmlCoercion(_))))
//! }
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{ConfigError, DecodeError, DispatchError, EncodeError, Result};
