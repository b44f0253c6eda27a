//! Server state

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// Shared application state: configuration plus the database service.
///
/// Cloning is cheap; the pool inside [`DbService`] is reference-counted.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
}

impl ServerState {
    /// Open the database and assemble the state.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;
        Ok(Self {
            config: config.clone(),
            db,
        })
    }
}
