//! Trait definitions for adlens model drivers.
//!
//! Agents only ever see a driver through [`AnalystDriver`], so the live HTTP
//! backend, the offline mock and scripted test doubles are interchangeable.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::AnalystDriver;
