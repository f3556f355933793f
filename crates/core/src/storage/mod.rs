pub mod cache;
pub mod kv;
