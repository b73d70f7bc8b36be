use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::LedgerRepository;
use crate::domain::services::{admission::AdmissionCalculator, auth_service::AuthService};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub ledger_repo: Arc<dyn LedgerRepository>,
    pub admission: AdmissionCalculator,
    pub auth_service: Arc<AuthService>,
}
