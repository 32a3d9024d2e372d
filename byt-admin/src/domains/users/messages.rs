use byt_model::prelude::{SuccessResponse, User, UserId};

use super::state::FormField;
use crate::infrastructure::errors::ApiResult;

#[derive(Debug)]
pub enum Message {
    // Search
    IdInputChanged(String),
    Search,
    UserFetched(UserId, ApiResult<User>),

    // Actions
    Create,
    Edit,
    Delete,

    // Form
    FieldChanged(FormField, String),
    NextField,
    PreviousField,
    TogglePasswordVisibility,

    // Confirmation gate
    Confirm,
    ModalConfirm,
    Cancel,

    // Mutation results
    UserCreated(ApiResult<SuccessResponse>),
    UserUpdated(ApiResult<SuccessResponse>),
    UserDeleted(ApiResult<SuccessResponse>),

    // Listing
    LoadUsers,
    UsersLoaded(ApiResult<Vec<User>>),

    DismissAlert,
}

impl Message {
    /// Debug rendering with the password field value hidden
    pub fn sanitized_display(&self) -> String {
        match self {
            Self::FieldChanged(FormField::Password, _) => {
                "FieldChanged(Password, ***)".to_string()
            }
            _ => format!("{:?}", self),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::IdInputChanged(_) => "Users::IdInputChanged",
            Self::Search => "Users::Search",
            Self::UserFetched(..) => "Users::UserFetched",
            Self::Create => "Users::Create",
            Self::Edit => "Users::Edit",
            Self::Delete => "Users::Delete",
            Self::FieldChanged(..) => "Users::FieldChanged",
            Self::NextField => "Users::NextField",
            Self::PreviousField => "Users::PreviousField",
            Self::TogglePasswordVisibility => "Users::TogglePasswordVisibility",
            Self::Confirm => "Users::Confirm",
            Self::ModalConfirm => "Users::ModalConfirm",
            Self::Cancel => "Users::Cancel",
            Self::UserCreated(_) => "Users::UserCreated",
            Self::UserUpdated(_) => "Users::UserUpdated",
            Self::UserDeleted(_) => "Users::UserDeleted",
            Self::LoadUsers => "Users::LoadUsers",
            Self::UsersLoaded(_) => "Users::UsersLoaded",
            Self::DismissAlert => "Users::DismissAlert",
        }
    }

    /// Messages produced by the operator rather than by a finished request.
    pub fn is_user_input(&self) -> bool {
        !matches!(
            self,
            Self::UserFetched(..)
                | Self::UserCreated(_)
                | Self::UserUpdated(_)
                | Self::UserDeleted(_)
                | Self::UsersLoaded(_)
                | Self::LoadUsers
        )
    }
}
