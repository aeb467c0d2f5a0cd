pub mod module;
pub mod transfer;
