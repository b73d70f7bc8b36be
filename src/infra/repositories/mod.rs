pub mod postgres_ledger_repo;
pub mod sqlite_ledger_repo;
