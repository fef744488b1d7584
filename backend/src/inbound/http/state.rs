//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{CategoryCatalogue, IdiomCatalogue, ImageUploads};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Idiom use-cases.
    pub idioms: Arc<dyn IdiomCatalogue>,
    /// Major and minor category use-cases.
    pub categories: Arc<dyn CategoryCatalogue>,
    /// Image upload use-case.
    pub uploads: Arc<dyn ImageUploads>,
}

impl HttpState {
    /// Bundle the driving ports used by the handlers.
    pub fn new(
        idioms: Arc<dyn IdiomCatalogue>,
        categories: Arc<dyn CategoryCatalogue>,
        uploads: Arc<dyn ImageUploads>,
    ) -> Self {
        Self {
            idioms,
            categories,
            uploads,
        }
    }
}
