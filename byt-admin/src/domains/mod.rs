pub mod auth;
pub mod cart;
pub mod nav;
pub mod users;
