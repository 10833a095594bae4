//! Government schemes.

use super::models::{Scheme, SchemeRequest};
use crate::net::{ApiResult, SessionGateway};

/// Client for `/schemes`
#[derive(Clone, Debug)]
pub struct SchemeService {
    gateway: SessionGateway,
}

impl SchemeService {
    pub fn new(gateway: SessionGateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> ApiResult<Vec<Scheme>> {
        self.gateway.get("/schemes").await?.into_data()
    }

    pub async fn active(&self) -> ApiResult<Vec<Scheme>> {
        self.gateway.get("/schemes/active").await?.into_data()
    }

    pub async fn create(&self, request: &SchemeRequest) -> ApiResult<Scheme> {
        self.gateway.post("/schemes", request).await?.into_data()
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.gateway
            .delete::<String>(&format!("/schemes/{}", id))
            .await?
            .into_result()
            .map(|_| ())
    }
}
