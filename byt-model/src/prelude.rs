//! Admin/UI focused snapshot of the types surface.
//! Prefer importing from this module in presentation layers.

pub use super::api::SuccessResponse;
pub use super::error::ModelError;
pub use super::ids::UserId;
pub use super::rbac::{Capability, UserPermissions};
pub use super::user::{CurrentUser, Password, RoleCode, User, UserPayload};
