use std::sync::Arc;

use axum::extract::FromRef;
use filmdb_dal::Pool;

#[derive(Clone)]
pub struct AppState {
    state: Arc<AppStateInner>,
}

impl AppState {
    pub fn new(pool: Pool) -> Self {
        AppState {
            state: Arc::new(AppStateInner { pool }),
        }
    }

    pub fn pool(&self) -> &Pool {
        &self.state.pool
    }
}

struct AppStateInner {
    pool: Pool,
}

// Validation context of payloads, needed by Garde extractor
impl FromRef<AppState> for () {
    fn from_ref(_state: &AppState) -> Self {}
}
