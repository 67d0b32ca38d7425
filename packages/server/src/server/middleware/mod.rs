// HTTP middleware
pub mod client_ip;
pub mod jwt_auth;

pub use client_ip::*;
pub use jwt_auth::*;
