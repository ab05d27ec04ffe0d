mod session;
mod session_helpers;

pub use session::{login_handler, logout_handler, me_handler};
pub use session_helpers::session_identity;

pub const SESSION_ADMIN_KEY: &str = "admin_identity";
