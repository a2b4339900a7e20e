use std::sync::Arc;

use crate::catalog::Catalog;
use crate::positions::PositionStore;

use super::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<Catalog>,
    pub positions: Arc<PositionStore>,
}
