use crate::config::Config;
use crate::data::SiteData;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub data: Arc<SiteData>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(data: SiteData, config: Config) -> Self {
        AppState {
            data: Arc::new(data),
            config: Arc::new(config),
        }
    }
}
