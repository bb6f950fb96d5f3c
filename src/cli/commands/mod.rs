pub mod cell;
pub mod check;
pub mod config;
pub mod delta;
pub mod export;
pub mod init;
pub mod log;
pub mod show;
pub mod upload;
