use std::sync::Arc;
use na_core::{Classifier, Storage};
use crate::auth::TokenService;

pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub classifier: Arc<dyn Classifier>,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(
        storage: Arc<dyn Storage>,
        classifier: Arc<dyn Classifier>,
        tokens: TokenService,
    ) -> Self {
        Self {
            storage,
            classifier,
            tokens,
        }
    }
}
