//! Build-Your-Tech user administration console.
//!
//! A terminal rendition of the storefront's users page: look a user up by
//! ID, create, edit or delete users through the `/usuarios` API, and see the
//! full listing alongside. The header carries the shop's role-gated
//! navigation, the cart badge and the session controls.
#![allow(missing_docs)]

pub mod app;
pub mod domains;
pub mod infrastructure;
pub mod ui;

pub use app::bootstrap::{BootstrapOptions, build_app, build_services};
pub use app::{AdminApp, AppServices, AppState, DomainMessage};
pub use domains::nav::Route;
pub use ui::TuiExit;
