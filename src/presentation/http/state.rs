use crate::{application::reports::console::ModerationConsole, config::Config};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub console: Arc<ModerationConsole>,
    pub config: Config,
}
