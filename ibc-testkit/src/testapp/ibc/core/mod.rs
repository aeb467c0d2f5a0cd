pub mod client_ctx;
pub mod configs;
pub mod core_ctx;
pub mod query_ctx;
pub mod types;
