//! Permission helpers for the navigation chrome
//!
//! Visibility checks go through [`PermissionChecker`] so no view compares
//! raw role codes.

use byt_model::prelude::{Capability, UserPermissions};

/// Permission checker for the signed-in operator
#[derive(Debug, Clone, Copy)]
pub struct PermissionChecker<'a> {
    permissions: &'a UserPermissions,
}

impl<'a> PermissionChecker<'a> {
    pub fn new(permissions: &'a UserPermissions) -> Self {
        Self { permissions }
    }

    /// Check if the operator holds a specific capability
    pub fn can(&self, capability: Capability) -> bool {
        self.permissions.has_capability(capability)
    }
}

/// Extension trait for the app state to reach the checker quickly
pub trait StatePermissionExt {
    fn permission_checker(&self) -> PermissionChecker<'_>;
}

impl StatePermissionExt for crate::app::AppState {
    fn permission_checker(&self) -> PermissionChecker<'_> {
        PermissionChecker::new(&self.session.permissions)
    }
}
