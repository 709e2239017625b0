//! Status service contract consumed by the poller.
//!
//! Services are async trait objects. Transport, retries, and auth belong to
//! the implementation; the poller only sees `Result`s.

mod http;

pub use http::HttpStatusService;

use crate::error::ServiceError;
use crate::status::{StatusObject, SubjectId};
use async_trait::async_trait;

/// Remote source of truth for one subject kind.
#[async_trait]
pub trait StatusService<S: StatusObject>: Send + Sync {
    /// Fetch the current status for `subject`.
    async fn fetch(&self, subject: &SubjectId) -> Result<S, ServiceError>;

    /// Start the remote job for `subject`. `Ok(false)` means the service
    /// declined.
    ///
    /// Services without a remote job keep the default body.
    async fn trigger(&self, subject: &SubjectId) -> Result<bool, ServiceError> {
        let _ = subject;
        Err(ServiceError::Unsupported)
    }
}

#[async_trait]
impl<S, T> StatusService<S> for std::sync::Arc<T>
where
    S: StatusObject,
    T: StatusService<S> + ?Sized,
{
    async fn fetch(&self, subject: &SubjectId) -> Result<S, ServiceError> {
        (**self).fetch(subject).await
    }

    async fn trigger(&self, subject: &SubjectId) -> Result<bool, ServiceError> {
        (**self).trigger(subject).await
    }
}
