//! Route-subsystem error type.

use thiserror::Error;

use crate::provider::ProviderError;

/// Errors produced by `bnav-route`.
///
/// `MissingEndpoint` is an input error recovered locally (no event);
/// the other variants surface to subscribers as a
/// `RouteCalculationError` event.  None of them are fatal.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("start or end point is not set")]
    MissingEndpoint,

    #[error("provider returned no routes")]
    NoRoute,

    #[error(transparent)]
    Provider(#[from] ProviderError),
}
