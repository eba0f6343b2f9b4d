// Brandgate upload gateway library

pub mod branding;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod server;
pub mod storage;
pub mod upload;
