use sea_orm::DatabaseConnection;
use std::sync::Arc;

use configs::ServiceKind;
use service::accounts::{repo::seaorm::SeaOrmAccountRepository, AccountService};

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub kind: ServiceKind,
    pub db: DatabaseConnection,
    pub accounts: AccountService<SeaOrmAccountRepository>,
}

impl AppState {
    pub fn new(kind: ServiceKind, db: DatabaseConnection) -> Self {
        let accounts = AccountService::new(Arc::new(SeaOrmAccountRepository::new(db.clone())));
        Self { kind, db, accounts }
    }
}
