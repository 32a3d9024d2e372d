use byt_model::prelude::{CurrentUser, UserPermissions};
use tracing::info;

/// Who is signed in and what they may see.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub current: Option<CurrentUser>,
    pub permissions: UserPermissions,
}

impl SessionState {
    pub fn new(current: Option<CurrentUser>) -> Self {
        let permissions = UserPermissions::for_user(current.as_ref());
        Self {
            current,
            permissions,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn sign_in(&mut self, user: CurrentUser) {
        self.permissions = UserPermissions::for_user(Some(&user));
        self.current = Some(user);
    }

    pub fn sign_out(&mut self) -> Option<CurrentUser> {
        self.permissions = UserPermissions::default();
        self.current.take()
    }
}

/// Login/logout actions provided by the host.
pub trait SessionHandler: Send + Sync {
    /// Start a login; `None` when no operator is available.
    fn login(&self) -> Option<CurrentUser>;

    fn logout(&self, user: &CurrentUser);
}

/// Signs in the operator named in the configuration.
#[derive(Debug, Clone)]
pub struct ConfiguredOperator {
    operator: CurrentUser,
}

impl ConfiguredOperator {
    pub fn new(operator: CurrentUser) -> Self {
        Self { operator }
    }
}

impl SessionHandler for ConfiguredOperator {
    fn login(&self) -> Option<CurrentUser> {
        info!(name = %self.operator.name, role = %self.operator.role, "Operator signed in");
        Some(self.operator.clone())
    }

    fn logout(&self, user: &CurrentUser) {
        info!(name = %user.name, "Operator signed out");
    }
}
