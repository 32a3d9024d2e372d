use byt_model::prelude::{ModelError, Password, RoleCode, User, UserId, UserPayload};

use crate::infrastructure::constants::text;

/// Editable fields of the user form, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Password,
    Role,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Password,
        FormField::Role,
    ];

    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Password,
            FormField::Password => FormField::Role,
            FormField::Role => FormField::Name,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::Name => FormField::Role,
            FormField::Email => FormField::Name,
            FormField::Password => FormField::Email,
            FormField::Role => FormField::Password,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Nombre",
            FormField::Email => "Correo",
            FormField::Password => "Contraseña",
            FormField::Role => "Rol",
        }
    }
}

/// The focused record: what was loaded by a search, or what is being typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub password: Password,
    /// Kept as typed; validated when the operator confirms.
    pub role: String,
}

impl UserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            role: user.role.map(|r| r.to_string()).unwrap_or_default(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.email.is_empty()
            && self.password.is_empty()
            && self.role.is_empty()
    }

    /// Current value of a field. The password is only exposed when
    /// `reveal` is set.
    pub fn display_value(&self, field: FormField, reveal: bool) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Password if reveal => self.password.expose(),
            FormField::Password => self.password.masked(),
            FormField::Role => &self.role,
        }
    }

    /// Plain value used to compute edits; never rendered.
    pub fn raw_value(&self, field: FormField) -> &str {
        match field {
            FormField::Password => self.password.expose(),
            other => self.display_value(other, false),
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Password => self.password = Password::new(value),
            FormField::Role => self.role = value,
        }
    }

    pub fn to_payload(&self) -> Result<UserPayload, ModelError> {
        Ok(UserPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            role: self.role.parse::<RoleCode>()?,
        })
    }
}

/// The mutation waiting for confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Create,
    Update(UserId),
    Delete(UserId),
}

impl PendingAction {
    pub fn prompt(self) -> &'static str {
        match self {
            PendingAction::Create => text::CONFIRM_CREATE,
            PendingAction::Update(_) => text::CONFIRM_UPDATE,
            PendingAction::Delete(_) => text::CONFIRM_DELETE,
        }
    }

    /// Whether the form is edited before confirming.
    pub fn edits_form(self) -> bool {
        !matches!(self, PendingAction::Delete(_))
    }
}

/// What the page is doing. Exactly one mode holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageMode {
    #[default]
    Idle,
    Searched {
        id: UserId,
    },
    /// Create or update in progress; the form is editable.
    Editing {
        action: PendingAction,
        field: FormField,
    },
    /// Delete waiting on the inline confirm; the form is read-only.
    Confirming {
        action: PendingAction,
    },
    Modal {
        action: PendingAction,
    },
}

impl PageMode {
    pub fn pending_action(self) -> Option<PendingAction> {
        match self {
            PageMode::Editing { action, .. }
            | PageMode::Confirming { action }
            | PageMode::Modal { action } => Some(action),
            PageMode::Idle | PageMode::Searched { .. } => None,
        }
    }

    pub fn is_editing(self) -> bool {
        matches!(self, PageMode::Editing { .. })
    }

    pub fn focused_field(self) -> Option<FormField> {
        match self {
            PageMode::Editing { field, .. } => Some(field),
            _ => None,
        }
    }

    pub fn shows_inline_confirm(self) -> bool {
        matches!(self, PageMode::Editing { .. } | PageMode::Confirming { .. })
    }

    pub fn shows_modal(self) -> bool {
        matches!(self, PageMode::Modal { .. })
    }

    pub fn availability(self) -> ActionAvailability {
        ActionAvailability {
            search: matches!(self, PageMode::Idle | PageMode::Searched { .. }),
            create: matches!(self, PageMode::Idle),
            edit: matches!(self, PageMode::Searched { .. }),
            delete: matches!(self, PageMode::Searched { .. }),
        }
    }
}

/// Which action buttons are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionAvailability {
    pub search: bool,
    pub create: bool,
    pub edit: bool,
    pub delete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Error,
}

/// Blocking notice shown until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub text: String,
}

impl Alert {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UsersPageState {
    pub id_input: String,
    pub form: UserForm,
    pub mode: PageMode,
    pub users: Vec<User>,
    pub alert: Option<Alert>,
    pub reveal_password: bool,
}

impl UsersPageState {
    pub fn availability(&self) -> ActionAvailability {
        self.mode.availability()
    }

    /// Back to the initial empty state. The listing is kept.
    pub fn reset_editing(&mut self) {
        self.form.clear();
        self.id_input.clear();
        self.mode = PageMode::Idle;
        self.reveal_password = false;
    }
}
