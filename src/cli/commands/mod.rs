pub mod config;
pub mod estimate;
pub mod history;
pub mod init;
pub mod log;
