use std::sync::Arc;

use crate::{catalog::PodcastCatalog, services::ModelProvider, vector::VectorIndex};

/// Shared application state
///
/// Everything here is read-only after startup; requests share it through
/// `Arc` without locking.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn ModelProvider>,
    pub index: Arc<VectorIndex>,
    pub catalog: Arc<PodcastCatalog>,
    /// Number of matches returned per query
    pub top_k: usize,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn ModelProvider>,
        index: VectorIndex,
        catalog: PodcastCatalog,
        top_k: usize,
    ) -> Self {
        Self {
            provider,
            index: Arc::new(index),
            catalog: Arc::new(catalog),
            top_k,
        }
    }
}
