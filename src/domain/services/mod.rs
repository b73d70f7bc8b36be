pub mod admission;
pub mod auth_service;
pub mod classifier;
pub mod duration;
pub mod listing;
pub mod rate_table;
