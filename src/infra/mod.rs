pub mod cache;
pub mod import;
