pub mod load_service;
pub mod query_service;
