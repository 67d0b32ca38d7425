// Portfolio content service - server library
pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::*;
