pub mod auth;

pub use crate::db::DbConn;
pub use auth::{Admin, Auth, Jwt, Ott, ResetPassword, Viewer};
