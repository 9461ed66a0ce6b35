use fengshui::catalog::ObjectCatalog;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ObjectCatalog>,
    pub search_timeout: Duration,
}

impl AppState {
    pub fn new(catalog: ObjectCatalog, search_timeout: Duration) -> Self {
        Self {
            catalog: Arc::new(catalog),
            search_timeout,
        }
    }
}
