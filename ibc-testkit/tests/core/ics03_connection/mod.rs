pub mod conn_open_ack;
pub mod conn_open_init;
