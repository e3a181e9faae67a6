//! Host resource release hooks.
//!
//! Custom 3D models are referenced by ephemeral urls the host allocated
//! (object URLs for uploads). The engine tracks when an element stops
//! referencing such a url — patched away, deleted, displaced by a scene
//! load — and tells the host through [`ResourceReleaser`] so the backing
//! allocation can be freed. Release failures are logged and swallowed by
//! the caller; a leaked url never fails an edit.

#[derive(Debug, thiserror::Error)]
pub enum ReleaseError {
    #[error("resource already released: {0}")]
    AlreadyReleased(String),
    #[error("unknown resource: {0}")]
    Unknown(String),
}

/// Host-side hook for freeing a custom model url.
pub trait ResourceReleaser {
    /// Free the allocation behind `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError`] when the host no longer knows the url or
    /// already freed it. Callers treat this as a warning, not a failure.
    fn release(&mut self, url: &str) -> Result<(), ReleaseError>;
}

/// Releaser for hosts without reclaimable resources; every call succeeds.
#[derive(Debug, Default)]
pub struct NoopReleaser;

impl ResourceReleaser for NoopReleaser {
    fn release(&mut self, _url: &str) -> Result<(), ReleaseError> {
        Ok(())
    }
}
