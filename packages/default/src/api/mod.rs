//! Access to the external environments API.
//!
//! The synchronizer only talks to the service through [`EnvironmentApi`], so
//! tests can substitute an in-memory fake for [`HttpEnvironmentApi`].

mod error;
mod http;

pub use error::ApiError;
pub use http::HttpEnvironmentApi;

use crate::models::environments::EnvironmentRecord;
use std::future::Future;

/// Whether `id` can be addressed as `/environments/{id}`.
///
/// URL normalisation collapses `.` and `..` into the parent path and an
/// empty id addresses the collection, so those never reach the service.
pub fn is_addressable_id(id: &str) -> bool {
    !matches!(id, "" | "." | "..")
}

/// The three calls the console makes against the environments service.
pub trait EnvironmentApi: Send + Sync + 'static {
    /// `GET /environments`
    fn list(&self) -> impl Future<Output = Result<Vec<EnvironmentRecord>, ApiError>> + Send;

    /// `POST /environments`. The response body is ignored.
    fn create(&self) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `DELETE /environments/{id}`. The response body is ignored.
    fn remove(&self, id: &str) -> impl Future<Output = Result<(), ApiError>> + Send;
}
