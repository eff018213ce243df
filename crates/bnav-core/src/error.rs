//! Framework error type.
//!
//! Sub-crates define their own error enums and either convert into
//! `CoreError` via `From` impls or keep them separate; prefer whichever
//! keeps error sites clean.

use thiserror::Error;

/// The top-level error type for `bnav-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("coordinate ({lon}, {lat}) outside the WGS-84 domain")]
    InvalidCoordinate { lon: f64, lat: f64 },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `bnav-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
