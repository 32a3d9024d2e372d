use std::sync::Arc;

use async_trait::async_trait;
use byt_model::prelude::{SuccessResponse, User, UserId, UserPayload};
use tracing::warn;

use crate::infrastructure::api_client::ApiClient;
use crate::infrastructure::constants::routes::{usuarios, utils};
use crate::infrastructure::errors::{ApiError, ApiResult};

/// The five `/usuarios` operations the users page drives.
#[async_trait]
pub trait UserAdminService: Send + Sync {
    async fn list_users(&self) -> ApiResult<Vec<User>>;
    async fn get_user(&self, id: UserId) -> ApiResult<User>;
    async fn create_user(&self, payload: &UserPayload) -> ApiResult<SuccessResponse>;
    async fn update_user(
        &self,
        id: UserId,
        payload: &UserPayload,
    ) -> ApiResult<SuccessResponse>;
    async fn delete_user(&self, id: UserId) -> ApiResult<SuccessResponse>;
}

#[derive(Debug, Clone)]
pub struct UserAdminApiAdapter {
    client: Arc<ApiClient>,
}

impl UserAdminApiAdapter {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

fn item_path(route: &str, id: UserId) -> String {
    utils::replace_param(route, "{id}", id.to_string())
}

#[async_trait]
impl UserAdminService for UserAdminApiAdapter {
    async fn list_users(&self) -> ApiResult<Vec<User>> {
        // The backend has been seen answering with an error object here.
        let value: serde_json::Value = self.client.get(usuarios::LIST).await?;
        if !value.is_array() {
            warn!("Unexpected user listing payload: {}", value);
            return Err(ApiError::UnexpectedShape {
                url: self.client.build_url(usuarios::LIST),
                expected: "an array of users",
            });
        }
        serde_json::from_value(value).map_err(|source| ApiError::Decode {
            url: self.client.build_url(usuarios::LIST),
            source,
        })
    }

    async fn get_user(&self, id: UserId) -> ApiResult<User> {
        self.client.get(&item_path(usuarios::ITEM, id)).await
    }

    async fn create_user(&self, payload: &UserPayload) -> ApiResult<SuccessResponse> {
        self.client.post(usuarios::CREATE, payload).await
    }

    async fn update_user(
        &self,
        id: UserId,
        payload: &UserPayload,
    ) -> ApiResult<SuccessResponse> {
        self.client.post(&item_path(usuarios::UPDATE, id), payload).await
    }

    async fn delete_user(&self, id: UserId) -> ApiResult<SuccessResponse> {
        self.client.delete(&item_path(usuarios::DELETE, id)).await
    }
}
