use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::Config;
use crate::db::enums::Catalog;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config, catalog: Catalog) -> Self {
        Self {
            db,
            config: Arc::new(config),
            catalog: Arc::new(catalog),
        }
    }
}
