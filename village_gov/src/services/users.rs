//! User administration.

use super::models::{User, UserEditRequest};
use crate::{
    net::{ApiResult, SessionGateway},
    session::{ProfileSource, UserProfile},
};

/// Client for `/user`
#[derive(Clone, Debug)]
pub struct UserService {
    gateway: SessionGateway,
}

impl UserService {
    pub fn new(gateway: SessionGateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> ApiResult<Vec<User>> {
        self.gateway.get("/user").await?.into_data()
    }

    /// Profile of the signed-in user, bypassing the profile cache
    pub async fn me(&self) -> ApiResult<UserProfile> {
        self.gateway.current_user().await
    }

    pub async fn edit(&self, request: &UserEditRequest) -> ApiResult<()> {
        self.gateway
            .put::<_, String>("/user/edit", request)
            .await?
            .into_result()
            .map(|_| ())
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.gateway
            .delete::<String>(&format!("/user/{}", id))
            .await?
            .into_result()
            .map(|_| ())
    }
}
