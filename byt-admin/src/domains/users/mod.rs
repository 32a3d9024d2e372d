//! Users page domain
//!
//! Search by ID, create, edit and delete users against `/usuarios`, behind a
//! two-step confirmation, next to a live listing of every user.

pub mod command;
pub mod messages;
pub mod state;
pub mod update;

pub use command::Command;
pub use messages::Message;
pub use state::{
    ActionAvailability, Alert, AlertKind, FormField, PageMode, PendingAction,
    UserForm, UsersPageState,
};
pub use update::update;
