use byt_model::prelude::{UserId, UserPayload};

/// Requests the page asks the runtime to perform. Each one resolves into a
/// single result message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    None,
    LoadUsers,
    FetchUser(UserId),
    CreateUser(UserPayload),
    UpdateUser(UserId, UserPayload),
    DeleteUser(UserId),
}
