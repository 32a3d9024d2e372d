pub mod permissions;
pub mod session;

pub use permissions::{PermissionChecker, StatePermissionExt};
pub use session::{ConfiguredOperator, SessionHandler, SessionState};
