pub mod dataset_cache;
