use std::sync::Arc;

use crate::config::AppConfig;
use crate::fetch::GameApi;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn GameApi>,
    pub config: Arc<AppConfig>,
}
