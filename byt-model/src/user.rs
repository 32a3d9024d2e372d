//! User records as exchanged with the `/usuarios` API.
//!
//! The backend uses Spanish field names on the wire (`nombre`, `correo`,
//! `contraseña`, `rol`); the Rust side keeps English names and maps them with
//! serde renames when the `serde` feature is enabled.

use std::fmt;
use std::str::FromStr;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::ModelError;
use crate::ids::UserId;

/// Numeric role code assigned to a user. `1` is the administrator role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RoleCode(pub u32);

impl RoleCode {
    pub const ADMIN: RoleCode = RoleCode(1);
}

impl FromStr for RoleCode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ModelError::InvalidRole(s.to_string()));
        }
        trimmed
            .parse::<u32>()
            .map(RoleCode)
            .map_err(|_| ModelError::InvalidRole(s.to_string()))
    }
}

impl fmt::Display for RoleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Records edited through older clients carry `rol` as a string.
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RoleCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(code) => Ok(RoleCode(code)),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Plaintext password as the API stores it.
///
/// The buffer is wiped on drop and never shows up in `Debug` output.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Password(String);

impl Password {
    const MASK: &'static str = "••••••••";

    pub fn new(value: impl Into<String>) -> Self {
        Password(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fixed-width mask; the real length is not revealed.
    pub fn masked(&self) -> &'static str {
        if self.0.is_empty() { "" } else { Self::MASK }
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

impl From<&str> for Password {
    fn from(value: &str) -> Self {
        Password::new(value)
    }
}

/// A user record as returned by `GET /usuarios/` and `GET /usuarios/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct User {
    pub id: UserId,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "nombre", default, deserialize_with = "lenient::null_as_default")
    )]
    pub name: String,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "correo", default, deserialize_with = "lenient::null_as_default")
    )]
    pub email: String,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "contraseña", default, deserialize_with = "lenient::null_as_default")
    )]
    pub password: Password,
    /// `None` when the stored role is missing, empty or not a number.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "rol", default, deserialize_with = "lenient::role")
    )]
    pub role: Option<RoleCode>,
}

// A single malformed stored field must not fail a whole listing.
#[cfg(feature = "serde")]
mod lenient {
    use serde::{Deserialize, Deserializer, de::IgnoredAny};
    use tracing::warn;

    use super::RoleCode;

    pub(super) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Default + Deserialize<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }

    pub(super) fn role<'de, D>(deserializer: D) -> Result<Option<RoleCode>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u32),
            Text(String),
            Other(IgnoredAny),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            None => None,
            Some(Raw::Number(code)) => Some(RoleCode(code)),
            Some(Raw::Text(text)) => match text.parse::<RoleCode>() {
                Ok(role) => Some(role),
                Err(err) => {
                    warn!("Ignoring stored role: {}", err);
                    None
                }
            },
            Some(Raw::Other(_)) => {
                warn!("Ignoring stored role of an unexpected type");
                None
            }
        })
    }
}

/// Request body for `POST /usuarios/crear` and `POST /usuarios/{id}/editar`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserPayload {
    #[cfg_attr(feature = "serde", serde(rename = "nombre"))]
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "correo"))]
    pub email: String,
    #[cfg_attr(feature = "serde", serde(rename = "contraseña"))]
    pub password: Password,
    #[cfg_attr(feature = "serde", serde(rename = "rol"))]
    pub role: RoleCode,
}

impl UserPayload {
    /// Materializes the record the server would hold after applying this
    /// payload under `id`.
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password: self.password,
            role: Some(self.role),
        }
    }
}

/// The signed-in operator as handed to the page by its host.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrentUser {
    pub name: String,
    pub role: RoleCode,
}

impl CurrentUser {
    pub fn new(name: impl Into<String>, role: RoleCode) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_debug_is_redacted() {
        let password = Password::new("hunter2");
        assert_eq!(format!("{password:?}"), "Password(***)");
        assert_eq!(password.masked(), "••••••••");
        assert_eq!(Password::default().masked(), "");
    }

    #[test]
    fn role_code_parses_digits_only() {
        assert_eq!("1".parse::<RoleCode>(), Ok(RoleCode::ADMIN));
        assert!("admin".parse::<RoleCode>().is_err());
        assert!("".parse::<RoleCode>().is_err());
    }

    #[cfg(feature = "serde")]
    mod wire {
        use super::super::*;
        use serde_json::json;

        #[test]
        fn user_uses_spanish_wire_names() {
            let user: User = serde_json::from_value(json!({
                "id": 5,
                "nombre": "Ana",
                "correo": "a@x.com",
                "contraseña": "p",
                "rol": 1
            }))
            .unwrap();

            assert_eq!(user.id, UserId(5));
            assert_eq!(user.name, "Ana");
            assert_eq!(user.email, "a@x.com");
            assert_eq!(user.password.expose(), "p");
            assert_eq!(user.role, Some(RoleCode::ADMIN));
        }

        #[test]
        fn role_accepts_numeric_strings_and_missing_fields_default() {
            let user: User =
                serde_json::from_value(json!({ "id": 9, "rol": "2" }))
                    .unwrap();
            assert_eq!(user.role, Some(RoleCode(2)));
            assert!(user.name.is_empty());
            assert!(user.password.is_empty());

        }

        #[test]
        fn unusable_roles_decode_as_none() {
            for rol in [json!(""), json!("jefe"), json!(-1), json!(null)] {
                let user: User =
                    serde_json::from_value(json!({ "id": 2, "rol": rol }))
                        .unwrap();
                assert_eq!(user.role, None, "rol = {rol}");
            }
        }

        #[test]
        fn null_text_fields_decode_as_empty() {
            let user: User = serde_json::from_value(json!({
                "id": 3,
                "nombre": "Luis",
                "correo": null,
                "contraseña": null,
                "rol": 2
            }))
            .unwrap();
            assert_eq!(user.name, "Luis");
            assert!(user.email.is_empty());
            assert!(user.password.is_empty());
            assert_eq!(user.role, Some(RoleCode(2)));
        }

        #[test]
        fn payload_serializes_role_as_number() {
            let payload = UserPayload {
                name: "Luis".into(),
                email: "l@x.com".into(),
                password: Password::new("s3cret"),
                role: RoleCode(2),
            };
            let value = serde_json::to_value(&payload).unwrap();
            assert_eq!(
                value,
                json!({
                    "nombre": "Luis",
                    "correo": "l@x.com",
                    "contraseña": "s3cret",
                    "rol": 2
                })
            );
        }
    }
}
