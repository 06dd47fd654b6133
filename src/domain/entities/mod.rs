pub mod dataset;
pub mod raw_table;
pub mod record;
pub mod selection;
pub mod summary;
