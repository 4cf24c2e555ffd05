//! Error types for adlens.
//!
//! This crate provides the error types shared by every adlens crate.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use adlens_error::{AdlensResult, HttpError};
//!
//! fn fetch_completion() -> AdlensResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! assert!(fetch_completion().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod agent;
mod backend;
mod config;
mod data;
mod error;
mod http;
mod json;
mod report;

pub use agent::{AgentError, AgentErrorKind};
pub use backend::BackendError;
pub use config::ConfigError;
pub use data::{DataError, DataErrorKind};
pub use error::{AdlensError, AdlensErrorKind, AdlensResult};
pub use http::HttpError;
pub use json::JsonError;
pub use report::{ReportError, ReportErrorKind};
