//! Navigation header domain
//!
//! Holds the routes the header can reach, which of them the signed-in
//! operator may see, and the open/closed state of the header menus.

use byt_model::prelude::Capability;
use tracing::debug;

use crate::domains::auth::{PermissionChecker, SessionState};

/// Client-side routes of the Build-Your-Tech front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Reports,
    Purchases,
    PurchaseCharacteristics,
    Users,
    Products,
    Chat,
    Cart,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Reports => "/graficas",
            Route::Purchases => "/compras",
            Route::PurchaseCharacteristics => "/caracompras",
            Route::Users => "/users",
            Route::Products => "/add-product",
            Route::Chat => "/chat",
            Route::Cart => "/cart",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Home => "Inicio",
            Route::Reports => "Gráficas",
            Route::Purchases => "Compra",
            Route::PurchaseCharacteristics => "Características de Compra",
            Route::Users => "Usuarios",
            Route::Products => "Productos",
            Route::Chat => "Asesoría IA",
            Route::Cart => "Carrito",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// One entry of the header bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEntry {
    Link {
        route: Route,
        requires: Option<Capability>,
    },
    Dropdown {
        label: &'static str,
        requires: Option<Capability>,
        routes: &'static [Route],
    },
}

impl NavEntry {
    fn requires(&self) -> Option<Capability> {
        match self {
            NavEntry::Link { requires, .. } | NavEntry::Dropdown { requires, .. } => {
                *requires
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NavEntry::Link { route, .. } => route.label(),
            NavEntry::Dropdown { label, .. } => label,
        }
    }
}

/// Header entries in display order. The logo and the cart badge live
/// outside this list.
pub const NAV_ENTRIES: [NavEntry; 5] = [
    NavEntry::Link {
        route: Route::Reports,
        requires: Some(Capability::ViewReports),
    },
    NavEntry::Dropdown {
        label: "Compras",
        requires: Some(Capability::ManagePurchases),
        routes: &[Route::Purchases, Route::PurchaseCharacteristics],
    },
    NavEntry::Link {
        route: Route::Users,
        requires: Some(Capability::ManageUsers),
    },
    NavEntry::Link {
        route: Route::Products,
        requires: Some(Capability::ManageProducts),
    },
    NavEntry::Link {
        route: Route::Chat,
        requires: None,
    },
];

/// Header entries the operator may see.
pub fn visible_entries(checker: &PermissionChecker<'_>) -> Vec<NavEntry> {
    NAV_ENTRIES
        .iter()
        .filter(|entry| entry.requires().is_none_or(|cap| checker.can(cap)))
        .copied()
        .collect()
}

/// A selectable row of the navigation menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub route: Route,
}

/// The header flattened into a selectable list: logo first, dropdown
/// children prefixed by their group, cart last.
pub fn menu_items(checker: &PermissionChecker<'_>) -> Vec<MenuItem> {
    let mut items = vec![MenuItem {
        label: Route::Home.label().to_string(),
        route: Route::Home,
    }];

    for entry in visible_entries(checker) {
        match entry {
            NavEntry::Link { route, .. } => items.push(MenuItem {
                label: route.label().to_string(),
                route,
            }),
            NavEntry::Dropdown { label, routes, .. } => {
                items.extend(routes.iter().map(|route| MenuItem {
                    label: format!("{label} › {}", route.label()),
                    route: *route,
                }));
            }
        }
    }

    items.push(MenuItem {
        label: Route::Cart.label().to_string(),
        route: Route::Cart,
    });
    items
}

/// Open/closed state of the header overlays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderState {
    /// Selected row while the navigation menu is open.
    pub menu: Option<usize>,
    pub user_dropdown_visible: bool,
}

impl HeaderState {
    pub fn is_overlay_open(&self) -> bool {
        self.menu.is_some() || self.user_dropdown_visible
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    OpenMenu,
    CloseMenu,
    MenuNext,
    MenuPrevious,
    MenuSelect,
    NavigateTo(Route),
    /// The user-name button when signed in, the login button otherwise.
    UserButton,
    CloseUserDropdown,
    Logout,
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenMenu => "Nav::OpenMenu",
            Self::CloseMenu => "Nav::CloseMenu",
            Self::MenuNext => "Nav::MenuNext",
            Self::MenuPrevious => "Nav::MenuPrevious",
            Self::MenuSelect => "Nav::MenuSelect",
            Self::NavigateTo(_) => "Nav::NavigateTo",
            Self::UserButton => "Nav::UserButton",
            Self::CloseUserDropdown => "Nav::CloseUserDropdown",
            Self::Logout => "Nav::Logout",
        }
    }
}

/// Side effects the host performs for the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    None,
    Navigate(Route),
    Login,
    Logout,
}

pub fn update(
    header: &mut HeaderState,
    session: &SessionState,
    message: Message,
) -> Command {
    debug!("Nav update: {}", message.name());

    match message {
        Message::OpenMenu => {
            header.user_dropdown_visible = false;
            header.menu = Some(0);
            Command::None
        }
        Message::CloseMenu => {
            header.menu = None;
            Command::None
        }
        Message::MenuNext | Message::MenuPrevious => {
            if let Some(selected) = header.menu {
                let len = menu_items(&PermissionChecker::new(&session.permissions)).len();
                header.menu = Some(if message == Message::MenuNext {
                    (selected + 1) % len
                } else {
                    (selected + len - 1) % len
                });
            }
            Command::None
        }
        Message::MenuSelect => {
            let Some(selected) = header.menu.take() else {
                return Command::None;
            };
            menu_items(&PermissionChecker::new(&session.permissions))
                .get(selected)
                .map_or(Command::None, |item| Command::Navigate(item.route))
        }
        Message::NavigateTo(route) => {
            header.menu = None;
            header.user_dropdown_visible = false;
            Command::Navigate(route)
        }
        Message::UserButton => {
            header.menu = None;
            if session.is_signed_in() {
                header.user_dropdown_visible = !header.user_dropdown_visible;
                Command::None
            } else {
                Command::Login
            }
        }
        Message::CloseUserDropdown => {
            header.user_dropdown_visible = false;
            Command::None
        }
        Message::Logout => {
            header.user_dropdown_visible = false;
            if session.is_signed_in() {
                Command::Logout
            } else {
                Command::None
            }
        }
    }
}
