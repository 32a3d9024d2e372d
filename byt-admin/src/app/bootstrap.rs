use std::sync::Arc;

use byt_config::AdminConfig;
use byt_model::prelude::{CurrentUser, RoleCode};
use tracing::info;

use super::{AdminApp, AppServices};
use crate::domains::auth::{ConfiguredOperator, SessionState};
use crate::domains::cart::SharedCart;
use crate::infrastructure::ApiClient;
use crate::infrastructure::errors::ApiResult;
use crate::infrastructure::services::{UserAdminApiAdapter, UserAdminService};
use crate::infrastructure::testing::InMemoryUserAdmin;

/// Startup switches that are not part of the persisted configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootstrapOptions {
    /// Serve `/usuarios` from memory instead of the network.
    pub offline_demo: bool,
    /// Start without a signed-in operator.
    pub logged_out: bool,
}

impl BootstrapOptions {
    pub fn with_offline_demo(mut self, enabled: bool) -> Self {
        self.offline_demo = enabled;
        self
    }

    pub fn with_logged_out(mut self, enabled: bool) -> Self {
        self.logged_out = enabled;
        self
    }
}

pub fn operator(config: &AdminConfig) -> CurrentUser {
    CurrentUser::new(config.operator.name.clone(), RoleCode(config.operator.role))
}

pub fn build_services(
    config: &AdminConfig,
    options: BootstrapOptions,
) -> ApiResult<AppServices> {
    let users: Arc<dyn UserAdminService> = if options.offline_demo {
        info!("Offline demo: serving /usuarios from memory");
        Arc::new(InMemoryUserAdmin::sample())
    } else {
        let client = ApiClient::new(
            config.api.base_url_str(),
            config.api.timeout,
            config.api.accept_invalid_certs,
        )?;
        Arc::new(UserAdminApiAdapter::new(Arc::new(client)))
    };

    Ok(AppServices {
        users,
        cart: Arc::new(SharedCart::new(config.cart.items)),
        session: Arc::new(ConfiguredOperator::new(operator(config))),
    })
}

/// Build the app with its services and starting session.
pub fn build_app(config: &AdminConfig, options: BootstrapOptions) -> ApiResult<AdminApp> {
    let services = build_services(config, options)?;
    let session = if options.logged_out {
        SessionState::default()
    } else {
        SessionState::new(Some(operator(config)))
    };
    Ok(AdminApp::new(services, session))
}
