//! Core data model definitions shared across the Build-Your-Tech admin crates.
#![allow(missing_docs)]

pub mod api;
pub mod error;
pub mod ids;
pub mod prelude;
pub mod rbac;
pub mod user;

pub use api::SuccessResponse;
pub use error::{ModelError, Result as ModelResult};
pub use ids::UserId;
pub use rbac::{Capability, UserPermissions};
pub use user::{CurrentUser, Password, RoleCode, User, UserPayload};
