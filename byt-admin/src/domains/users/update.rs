use byt_model::prelude::{SuccessResponse, UserId};
use tracing::{debug, error, info, trace, warn};

use super::command::Command;
use super::messages::Message;
use super::state::{
    Alert, FormField, PageMode, PendingAction, UserForm, UsersPageState,
};
use crate::infrastructure::constants::text;
use crate::infrastructure::errors::ApiResult;

/// Handle users page messages
pub fn update(state: &mut UsersPageState, message: Message) -> Command {
    debug!("Users update: {}", message.name());
    trace!("Users message: {}", message.sanitized_display());

    if state.alert.is_some() && message.is_user_input() {
        if matches!(message, Message::DismissAlert) {
            state.alert = None;
        }
        return Command::None;
    }

    match message {
        Message::IdInputChanged(value) => {
            if !state.availability().search
                || !value.bytes().all(|b| b.is_ascii_digit())
                || value == state.id_input
            {
                return Command::None;
            }
            state.id_input = value;
            state.form.clear();
            state.mode = PageMode::Idle;
            Command::None
        }

        Message::Search => {
            if !state.availability().search {
                return Command::None;
            }
            match state.id_input.parse::<UserId>() {
                Ok(id) => {
                    info!("Fetching user {}", id);
                    Command::FetchUser(id)
                }
                Err(err) => {
                    debug!("Rejected search input: {}", err);
                    state.alert = Some(Alert::error(text::INVALID_ID));
                    Command::None
                }
            }
        }

        Message::UserFetched(id, result) => match result {
            Ok(user) => {
                state.form = UserForm::from_user(&user);
                state.mode = PageMode::Searched { id };
                state.reveal_password = false;
                Command::LoadUsers
            }
            Err(err) => {
                if err.is_not_found() {
                    warn!("User {} not found", id);
                } else {
                    error!("Failed to fetch user {}: {}", id, err);
                }
                state.form.clear();
                state.mode = PageMode::Idle;
                state.alert = Some(Alert::error(text::USER_NOT_FOUND));
                Command::None
            }
        },

        Message::Create => {
            if state.availability().create {
                state.reset_editing();
                state.mode = PageMode::Editing {
                    action: PendingAction::Create,
                    field: FormField::Name,
                };
            }
            Command::None
        }

        Message::Edit => {
            if let PageMode::Searched { id } = state.mode {
                state.mode = PageMode::Editing {
                    action: PendingAction::Update(id),
                    field: FormField::Name,
                };
            }
            Command::None
        }

        Message::Delete => {
            if let PageMode::Searched { id } = state.mode {
                state.mode = PageMode::Confirming {
                    action: PendingAction::Delete(id),
                };
            }
            Command::None
        }

        Message::FieldChanged(field, value) => {
            if let PageMode::Editing { action, .. } = state.mode {
                state.form.set(field, value);
                state.mode = PageMode::Editing { action, field };
            }
            Command::None
        }

        Message::NextField | Message::PreviousField => {
            if let PageMode::Editing { action, field } = state.mode {
                let field = if matches!(message, Message::NextField) {
                    field.next()
                } else {
                    field.previous()
                };
                state.mode = PageMode::Editing { action, field };
            }
            Command::None
        }

        Message::TogglePasswordVisibility => {
            if state.mode.is_editing() {
                state.reveal_password = !state.reveal_password;
            }
            Command::None
        }

        Message::Confirm => {
            match state.mode {
                PageMode::Editing { action, .. } => {
                    if let Err(err) = state.form.to_payload() {
                        debug!("Form rejected: {}", err);
                        state.alert = Some(Alert::error(text::INVALID_ROLE));
                    } else {
                        state.mode = PageMode::Modal { action };
                    }
                }
                PageMode::Confirming { action } => {
                    state.mode = PageMode::Modal { action };
                }
                _ => {}
            }
            Command::None
        }

        Message::ModalConfirm => {
            let PageMode::Modal { action } = state.mode else {
                return Command::None;
            };
            let command = match action {
                PendingAction::Delete(id) => Ok(Command::DeleteUser(id)),
                PendingAction::Create => {
                    state.form.to_payload().map(Command::CreateUser)
                }
                PendingAction::Update(id) => state
                    .form
                    .to_payload()
                    .map(|payload| Command::UpdateUser(id, payload)),
            };
            state.reset_editing();
            match command {
                Ok(command) => {
                    info!("Confirmed {:?}", action);
                    command
                }
                Err(err) => {
                    warn!("Confirmed form no longer valid: {}", err);
                    state.alert = Some(Alert::error(text::INVALID_ROLE));
                    Command::None
                }
            }
        }

        Message::Cancel => {
            if let Some(action) = state.mode.pending_action() {
                debug!("Cancelled {:?}", action);
            }
            state.reset_editing();
            Command::None
        }

        Message::UserCreated(result) => {
            mutation_finished(state, result, text::CREATE_FAILED)
        }
        Message::UserUpdated(result) => {
            mutation_finished(state, result, text::UPDATE_FAILED)
        }
        Message::UserDeleted(result) => {
            mutation_finished(state, result, text::DELETE_FAILED)
        }

        Message::LoadUsers => Command::LoadUsers,

        Message::UsersLoaded(result) => {
            match result {
                Ok(users) => {
                    info!("Loaded {} users", users.len());
                    state.users = users;
                }
                Err(err) => {
                    warn!("Failed to load users: {}", err);
                    state.users.clear();
                }
            }
            Command::None
        }

        Message::DismissAlert => Command::None,
    }
}

fn mutation_finished(
    state: &mut UsersPageState,
    result: ApiResult<SuccessResponse>,
    failure_text: &'static str,
) -> Command {
    match result {
        Ok(response) => {
            info!("Mutation succeeded: {}", response.success);
            state.alert = Some(Alert::info(response.success));
            Command::LoadUsers
        }
        Err(err) => {
            error!("Mutation failed: {}", err);
            state.alert = Some(Alert::error(failure_text));
            Command::None
        }
    }
}
