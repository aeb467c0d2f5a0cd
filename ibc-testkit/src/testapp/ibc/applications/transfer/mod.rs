pub mod bank;

pub use bank::MockBank;
