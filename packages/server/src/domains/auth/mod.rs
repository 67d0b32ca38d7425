//! Auth domain - admin password login and JWT issuance
//!
//! There is a single admin identity. Logging in with `ADMIN_PASSWORD`
//! yields a 24 h HS256 token that unlocks `/api/admin/*`.

pub mod edges;
pub mod jwt;
pub mod password;

pub use jwt::{Claims, IssuedToken, JwtService};
pub use password::AdminPassword;
