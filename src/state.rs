use crate::config::AppConfig;
use crate::users::repo::{MemoryUserRepo, UserRepo};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepo>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn init(config: AppConfig) -> Self {
        let users = Arc::new(MemoryUserRepo::new()) as Arc<dyn UserRepo>;
        Self::from_parts(users, Arc::new(config))
    }

    pub fn from_parts(users: Arc<dyn UserRepo>, config: Arc<AppConfig>) -> Self {
        Self { users, config }
    }

    /// Empty in-memory state with default settings and the given response mode.
    #[cfg(test)]
    pub fn fake(response_mode: crate::config::ResponseMode) -> Self {
        Self::init(AppConfig {
            response_mode,
            ..AppConfig::default()
        })
    }
}
