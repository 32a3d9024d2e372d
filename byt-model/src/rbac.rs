//! Role-based capabilities
//!
//! Roles on the Build-Your-Tech backend are bare numeric codes. The admin
//! tools never compare those codes directly; a role is first resolved into a
//! set of [`Capability`] values and visibility decisions ask for capabilities.
//!
//! ## Example
//!
//! ```
//! use byt_model::rbac::{Capability, UserPermissions};
//! use byt_model::user::RoleCode;
//!
//! let permissions = UserPermissions::for_role(RoleCode::ADMIN);
//! assert!(permissions.has_capability(Capability::ManageUsers));
//! ```

use std::collections::BTreeSet;
use std::fmt;

use crate::user::{CurrentUser, RoleCode};

/// A granular action the navigation chrome can gate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Capability {
    /// Sales charts.
    ViewReports,
    /// Purchases and purchase characteristics.
    ManagePurchases,
    /// The user management page.
    ManageUsers,
    /// Product catalogue editing.
    ManageProducts,
}

impl Capability {
    pub const ALL: [Capability; 4] = [
        Capability::ViewReports,
        Capability::ManagePurchases,
        Capability::ManageUsers,
        Capability::ManageProducts,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Capability::ViewReports => "reports:view",
            Capability::ManagePurchases => "purchases:manage",
            Capability::ManageUsers => "users:manage",
            Capability::ManageProducts => "products:manage",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Effective capabilities of one operator, computed from their role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPermissions {
    pub role: Option<RoleCode>,
    pub capabilities: BTreeSet<Capability>,
}

impl UserPermissions {
    /// Capabilities granted by a role code. Unknown codes grant nothing.
    pub fn for_role(role: RoleCode) -> Self {
        let capabilities = if role == RoleCode::ADMIN {
            Capability::ALL.into_iter().collect()
        } else {
            BTreeSet::new()
        };

        Self {
            role: Some(role),
            capabilities,
        }
    }

    /// Permissions for an optional signed-in operator; nobody signed in
    /// means no capabilities.
    pub fn for_user(user: Option<&CurrentUser>) -> Self {
        user.map(|u| Self::for_role(u.role)).unwrap_or_default()
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn has_any_capability(&self, capabilities: &[Capability]) -> bool {
        capabilities.iter().any(|c| self.has_capability(*c))
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(RoleCode::ADMIN)
    }
}
