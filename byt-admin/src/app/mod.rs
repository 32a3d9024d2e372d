//! App runtime
//!
//! Routes [`DomainMessage`]s to the domain `update` functions and performs
//! the commands they return. Commands run one at a time, each awaited
//! before the next message is handled.

pub mod bootstrap;

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domains::auth::{SessionHandler, SessionState};
use crate::domains::cart::CartContext;
use crate::domains::nav::{self, HeaderState, Route};
use crate::domains::users::{self, UsersPageState};
use crate::infrastructure::services::UserAdminService;

#[derive(Debug)]
pub enum DomainMessage {
    Users(users::Message),
    Nav(nav::Message),
}

impl DomainMessage {
    pub fn name(&self) -> &'static str {
        match self {
            DomainMessage::Users(message) => message.name(),
            DomainMessage::Nav(message) => message.name(),
        }
    }
}

impl From<users::Message> for DomainMessage {
    fn from(message: users::Message) -> Self {
        DomainMessage::Users(message)
    }
}

impl From<nav::Message> for DomainMessage {
    fn from(message: nav::Message) -> Self {
        DomainMessage::Nav(message)
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub route: Route,
    pub users: UsersPageState,
    pub header: HeaderState,
    pub session: SessionState,
}

impl AppState {
    pub fn new(session: SessionState) -> Self {
        Self {
            route: Route::Users,
            users: UsersPageState::default(),
            header: HeaderState::default(),
            session,
        }
    }
}

/// Collaborators the page talks to.
#[derive(Clone)]
pub struct AppServices {
    pub users: Arc<dyn UserAdminService>,
    pub cart: Arc<dyn CartContext>,
    pub session: Arc<dyn SessionHandler>,
}

impl std::fmt::Debug for AppServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppServices")
            .field("cart_items", &self.cart.total_items())
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct AdminApp {
    state: AppState,
    services: AppServices,
}

impl AdminApp {
    pub fn new(services: AppServices, session: SessionState) -> Self {
        Self {
            state: AppState::new(session),
            services,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn cart_items(&self) -> usize {
        self.services.cart.total_items()
    }

    /// Whether the operator is still on the users page.
    pub fn is_on_users_page(&self) -> bool {
        self.state.route == Route::Users
    }

    /// Initial listing fetch.
    pub async fn init(&mut self) {
        self.dispatch(users::Message::LoadUsers.into()).await;
    }

    /// Handle a message and every follow-up message its commands produce.
    pub async fn dispatch(&mut self, message: DomainMessage) {
        let mut queue = VecDeque::from([message]);

        while let Some(message) = queue.pop_front() {
            debug!("Dispatching {}", message.name());
            match message {
                DomainMessage::Users(message) => {
                    let command = users::update(&mut self.state.users, message);
                    if let Some(next) = self.run_users_command(command).await {
                        queue.push_back(next.into());
                    }
                }
                DomainMessage::Nav(message) => {
                    let command =
                        nav::update(&mut self.state.header, &self.state.session, message);
                    self.run_nav_command(command);
                }
            }
        }
    }

    async fn run_users_command(
        &self,
        command: users::Command,
    ) -> Option<users::Message> {
        let service = &self.services.users;
        let message = match command {
            users::Command::None => return None,
            users::Command::LoadUsers => {
                users::Message::UsersLoaded(service.list_users().await)
            }
            users::Command::FetchUser(id) => {
                users::Message::UserFetched(id, service.get_user(id).await)
            }
            users::Command::CreateUser(payload) => {
                users::Message::UserCreated(service.create_user(&payload).await)
            }
            users::Command::UpdateUser(id, payload) => {
                users::Message::UserUpdated(service.update_user(id, &payload).await)
            }
            users::Command::DeleteUser(id) => {
                users::Message::UserDeleted(service.delete_user(id).await)
            }
        };
        Some(message)
    }

    fn run_nav_command(&mut self, command: nav::Command) {
        match command {
            nav::Command::None => {}
            nav::Command::Navigate(route) => {
                info!("Navigating to {}", route);
                self.state.route = route;
            }
            nav::Command::Login => {
                if let Some(user) = self.services.session.login() {
                    self.state.session.sign_in(user);
                }
            }
            nav::Command::Logout => {
                if let Some(user) = self.state.session.sign_out() {
                    self.services.session.logout(&user);
                }
                self.state.route = Route::Home;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::auth::ConfiguredOperator;
    use crate::domains::cart::SharedCart;
    use crate::infrastructure::testing::{InMemoryUserAdmin, RecordedCall};
    use byt_model::prelude::{CurrentUser, RoleCode};

    fn app(stub: &InMemoryUserAdmin, session: SessionState) -> AdminApp {
        let services = AppServices {
            users: Arc::new(stub.clone()),
            cart: Arc::new(SharedCart::new(3)),
            session: Arc::new(ConfiguredOperator::new(CurrentUser::new(
                "root",
                RoleCode::ADMIN,
            ))),
        };
        AdminApp::new(services, session)
    }

    #[tokio::test]
    async fn init_loads_the_listing() {
        let stub = InMemoryUserAdmin::sample();
        let mut app = app(&stub, SessionState::default());
        app.init().await;

        assert_eq!(app.state().users.users.len(), 3);
        assert_eq!(stub.calls(), vec![RecordedCall::ListUsers]);
        assert_eq!(app.cart_items(), 3);
    }

    #[tokio::test]
    async fn login_then_logout_leaves_the_page() {
        let stub = InMemoryUserAdmin::new();
        let mut app = app(&stub, SessionState::default());

        app.dispatch(nav::Message::UserButton.into()).await;
        assert!(app.state().session.permissions.is_admin());
        assert!(app.is_on_users_page());

        app.dispatch(nav::Message::UserButton.into()).await;
        app.dispatch(nav::Message::Logout.into()).await;
        assert!(app.state().session.current.is_none());
        assert_eq!(app.state().route, Route::Home);
        assert!(!app.is_on_users_page());
    }
}
