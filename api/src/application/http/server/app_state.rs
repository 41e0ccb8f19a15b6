use std::sync::Arc;

use smartfridge_core::application::SmartFridgeService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: SmartFridgeService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: SmartFridgeService) -> Self {
        Self { args, service }
    }
}
