//! Application state shared by every handler.

use careerlink_core::Config;

use crate::services::upload::UploadIntakeService;

pub struct AppState {
    pub config: Config,
    pub uploads: UploadIntakeService,
}

impl AppState {
    pub fn new(config: Config, uploads: UploadIntakeService) -> Self {
        Self { config, uploads }
    }
}
