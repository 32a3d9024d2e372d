use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use byt_model::prelude::{
    Password, RoleCode, SuccessResponse, User, UserId, UserPayload,
};
use reqwest::StatusCode;

use crate::infrastructure::constants::routes::{usuarios, utils};
use crate::infrastructure::errors::{ApiError, ApiResult};
use crate::infrastructure::services::UserAdminService;

const MEMORY_BASE: &str = "memory://byt";

/// One call received by [`InMemoryUserAdmin`], in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    ListUsers,
    GetUser(UserId),
    CreateUser(UserPayload),
    UpdateUser(UserId, UserPayload),
    DeleteUser(UserId),
}

/// Operations that can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StubOperation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

/// In-memory stand-in for the `/usuarios` backend.
///
/// Backs the offline demo mode and the page tests. Every call is recorded
/// so tests can assert on exactly which requests a flow issued.
#[derive(Debug, Clone)]
pub struct InMemoryUserAdmin {
    inner: Arc<RwLock<InnerState>>,
}

#[derive(Debug, Default)]
struct InnerState {
    users: BTreeMap<UserId, User>,
    next_id: u64,
    calls: Vec<RecordedCall>,
    failing: HashSet<StubOperation>,
    list_returns_object: bool,
}

impl InMemoryUserAdmin {
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users: BTreeMap<UserId, User> =
            users.into_iter().map(|u| (u.id, u)).collect();
        let next_id = users.keys().map(|id| id.get()).max().unwrap_or(0) + 1;
        Self {
            inner: Arc::new(RwLock::new(InnerState {
                users,
                next_id,
                ..InnerState::default()
            })),
        }
    }

    /// Seed data for the offline demo.
    pub fn sample() -> Self {
        Self::with_users([
            sample_user(1, "Administrador", "admin@buildyourtech.com", 1),
            sample_user(2, "Ana Torres", "ana@buildyourtech.com", 2),
            sample_user(3, "Luis Pérez", "luis@buildyourtech.com", 2),
        ])
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.read(|state| state.calls.clone())
    }

    pub fn clear_calls(&self) {
        self.write(|state| state.calls.clear());
    }

    pub fn users(&self) -> Vec<User> {
        self.read(|state| state.users.values().cloned().collect())
    }

    pub fn user(&self, id: UserId) -> Option<User> {
        self.read(|state| state.users.get(&id).cloned())
    }

    /// Make `operation` answer with HTTP 500 until reset.
    pub fn set_failing(&self, operation: StubOperation, failing: bool) {
        self.write(|state| {
            if failing {
                state.failing.insert(operation);
            } else {
                state.failing.remove(&operation);
            }
        });
    }

    /// Make the listing answer with a JSON object instead of an array.
    pub fn set_list_returns_object(&self, enabled: bool) {
        self.write(|state| state.list_returns_object = enabled);
    }

    fn read<R>(&self, f: impl FnOnce(&InnerState) -> R) -> R {
        match self.inner.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    fn write<R>(&self, f: impl FnOnce(&mut InnerState) -> R) -> R {
        match self.inner.write() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl Default for InMemoryUserAdmin {
    fn default() -> Self {
        Self::new()
    }
}

fn url(route: &str, id: Option<UserId>) -> String {
    let path = match id {
        Some(id) => utils::replace_param(route, "{id}", id.to_string()),
        None => route.to_string(),
    };
    format!("{MEMORY_BASE}{path}")
}

fn status_error(url: String, status: StatusCode) -> ApiError {
    ApiError::Status {
        url,
        status,
        body: status.canonical_reason().unwrap_or("error").to_string(),
    }
}

impl InnerState {
    fn guard(&self, operation: StubOperation, url: &str) -> ApiResult<()> {
        if self.failing.contains(&operation) {
            Err(status_error(url.to_string(), StatusCode::INTERNAL_SERVER_ERROR))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UserAdminService for InMemoryUserAdmin {
    async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.write(|state| {
            state.calls.push(RecordedCall::ListUsers);
            let url = url(usuarios::LIST, None);
            state.guard(StubOperation::List, &url)?;
            if state.list_returns_object {
                return Err(ApiError::UnexpectedShape {
                    url,
                    expected: "an array of users",
                });
            }
            Ok(state.users.values().cloned().collect())
        })
    }

    async fn get_user(&self, id: UserId) -> ApiResult<User> {
        self.write(|state| {
            state.calls.push(RecordedCall::GetUser(id));
            let url = url(usuarios::ITEM, Some(id));
            state.guard(StubOperation::Get, &url)?;
            state
                .users
                .get(&id)
                .cloned()
                .ok_or_else(|| status_error(url, StatusCode::NOT_FOUND))
        })
    }

    async fn create_user(&self, payload: &UserPayload) -> ApiResult<SuccessResponse> {
        self.write(|state| {
            state.calls.push(RecordedCall::CreateUser(payload.clone()));
            state.guard(StubOperation::Create, &url(usuarios::CREATE, None))?;
            let id = UserId(state.next_id);
            state.next_id += 1;
            state.users.insert(id, payload.clone().into_user(id));
            Ok(SuccessResponse::new("Usuario creado exitosamente"))
        })
    }

    async fn update_user(
        &self,
        id: UserId,
        payload: &UserPayload,
    ) -> ApiResult<SuccessResponse> {
        self.write(|state| {
            state
                .calls
                .push(RecordedCall::UpdateUser(id, payload.clone()));
            let url = url(usuarios::UPDATE, Some(id));
            state.guard(StubOperation::Update, &url)?;
            match state.users.get_mut(&id) {
                Some(existing) => {
                    *existing = payload.clone().into_user(id);
                    Ok(SuccessResponse::new("Usuario actualizado exitosamente"))
                }
                None => Err(status_error(url, StatusCode::NOT_FOUND)),
            }
        })
    }

    async fn delete_user(&self, id: UserId) -> ApiResult<SuccessResponse> {
        self.write(|state| {
            state.calls.push(RecordedCall::DeleteUser(id));
            let url = url(usuarios::DELETE, Some(id));
            state.guard(StubOperation::Delete, &url)?;
            match state.users.remove(&id) {
                Some(_) => Ok(SuccessResponse::new("Usuario eliminado exitosamente")),
                None => Err(status_error(url, StatusCode::NOT_FOUND)),
            }
        })
    }
}

/// Build a user record for fixtures.
pub fn sample_user(id: u64, name: &str, email: &str, role: u32) -> User {
    User {
        id: UserId(id),
        name: name.to_string(),
        email: email.to_string(),
        password: Password::new(format!("clave{id}")),
        role: Some(RoleCode(role)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn created_users_get_the_next_free_id() {
        let stub = InMemoryUserAdmin::sample();
        let payload = UserPayload {
            name: "Eva".into(),
            email: "e@x.com".into(),
            password: Password::new("pw"),
            role: RoleCode(2),
        };
        stub.create_user(&payload).await.unwrap();
        assert_eq!(stub.user(UserId(4)).map(|u| u.name), Some("Eva".to_string()));
    }

    #[tokio::test]
    async fn failing_operations_answer_500_and_are_still_recorded() {
        let stub = InMemoryUserAdmin::sample();
        stub.set_failing(StubOperation::Delete, true);

        let err = stub.delete_user(UserId(1)).await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(stub.user(UserId(1)).is_some());
        assert_eq!(stub.calls(), vec![RecordedCall::DeleteUser(UserId(1))]);
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let stub = InMemoryUserAdmin::new();
        let err = stub.get_user(UserId(9)).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("memory://byt/usuarios/9"));
    }
}
