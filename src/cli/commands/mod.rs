//! CLI command implementations

pub mod completions;
pub mod config;
pub mod gateway;
pub mod init;
pub mod list;
pub mod search;
pub mod seed;
pub mod serve;
pub mod verify;
