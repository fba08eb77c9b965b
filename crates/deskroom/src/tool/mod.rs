pub mod app_config;
mod frame_state;
mod input;
mod runners;
mod scene_renderer;
mod timer;

use anyhow::Result;

use crate::tool::app_config::AppConfig;
use crate::tool::runners::window_runner::WindowRunner;

pub fn run_app(config: AppConfig) -> Result<()> {
    WindowRunner::run(config)
}
